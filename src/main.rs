use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use mdm_enroll::app_state::AppState;
use mdm_enroll::config::Config;
use mdm_enroll::routes;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "unable to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let state = match AppState::with_config(config) {
        Ok(state) => state,
        Err(err) => {
            tracing::error!(%err, "unable to load signing certificate");
            return ExitCode::FAILURE;
        }
    };

    // We still serve requests, so that devices receive a reason.
    if let Err(err) = state.assembler.settings().validate() {
        tracing::warn!(%err, "enrollment profiles cannot be generated");
    }

    let service = &state.config.service;
    let address = SocketAddr::new(service.bind_address, service.port);
    let tls_identity = state
        .config
        .tls_identity()
        .map(|(cert, key)| (cert.to_path_buf(), key.to_path_buf()));
    let app = routes::create_routes(state).into_make_service();

    let result = match tls_identity {
        Some((cert_path, key_path)) => {
            let tls_config = match RustlsConfig::from_pem_file(&cert_path, &key_path).await {
                Ok(tls_config) => tls_config,
                Err(err) => {
                    tracing::error!(%err, "unable to load TLS certificate");
                    return ExitCode::FAILURE;
                }
            };
            tracing::info!(%address, "serving over https");
            axum_server::bind_rustls(address, tls_config).serve(app).await
        }
        None => {
            tracing::info!(%address, "serving over http");
            axum_server::bind(address).serve(app).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "server stopped");
            ExitCode::FAILURE
        }
    }
}
