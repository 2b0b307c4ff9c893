use axum::Router;
use axum::extract::State;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

mod profile;

pub use profile::{PROFILE_CONTENT_TYPE, generate_profile};

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(
            "/profile",
            get(profile::generate_profile).post(profile::generate_profile),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> String {
    format!(
        "Install the enrollment profile from {} to enroll this device.",
        state.assembler.urls().profile_url()
    )
}

/// The externally reachable URLs of this server, as embedded within profiles.
#[derive(Clone, Debug)]
pub struct ServerUrls {
    base_url: String,
}

impl ServerUrls {
    /// The base domain may include a port, e.g. `mdm.example.com:8443`.
    pub fn new(base_domain: &str) -> Self {
        ServerUrls {
            base_url: format!("https://{base_domain}"),
        }
    }

    /// Where devices receive commands.
    pub fn mdm_url(&self) -> String {
        format!("{}/mdm", self.base_url)
    }

    /// Where devices check in, and out.
    pub fn check_in_url(&self) -> String {
        format!("{}/checkin", self.base_url)
    }

    pub fn profile_url(&self) -> String {
        format!("{}/profile", self.base_url)
    }
}
