use serde::Deserialize;
use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    /// Exactly one organization is expected.
    #[serde(default, rename = "organization")]
    pub organizations: Vec<Organization>,
    /// Likewise, exactly one SCEP server is expected.
    #[serde(default)]
    pub scep: Vec<ScepConfig>,
    pub certificates: CertificatesConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// The domain devices reach this server at.
    pub base_domain: String,
}

// We should bind to 127.0.0.1 by default.
fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    8443
}

/// The organization devices are enrolled into.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Organization {
    pub name: String,
    /// The root of every payload identifier, in reverse domain notation.
    #[serde(default)]
    pub payload_prefix: String,
    pub description: Option<String>,
}

/// The SCEP server devices obtain their identity from.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ScepConfig {
    pub url: String,
    pub name: Option<String>,
    pub challenge: Option<String>,
    pub key_size: Option<u32>,
    pub key_usage: Option<u32>,
    pub retries: Option<u32>,
    pub retry_delay: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CertificatesConfig {
    /// The APNs push certificate. Required to enroll.
    pub push_certificate: PathBuf,
    /// The web server certificate, which devices are given to trust.
    pub ssl_certificate: Option<PathBuf>,
    /// When present alongside ssl_certificate, we serve TLS and sign profiles.
    pub ssl_key: Option<PathBuf>,
}

impl Config {
    /// Loads the configuration from the specified path.
    /// Relative certificate paths are resolved against the configuration's directory.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&contents)?;

        if let Some(base_dir) = path.parent() {
            config.certificates.resolve_against(base_dir);
        }
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// The certificate and key to serve TLS with, if both are configured.
    pub fn tls_identity(&self) -> Option<(&Path, &Path)> {
        let certificates = &self.certificates;
        match (&certificates.ssl_certificate, &certificates.ssl_key) {
            (Some(cert), Some(key)) => Some((cert.as_path(), key.as_path())),
            _ => None,
        }
    }
}

impl CertificatesConfig {
    fn resolve_against(&mut self, base_dir: &Path) {
        let paths = [
            Some(&mut self.push_certificate),
            self.ssl_certificate.as_mut(),
            self.ssl_key.as_mut(),
        ];
        for path in paths.into_iter().flatten() {
            if path.is_relative() {
                *path = base_dir.join(&*path);
            }
        }
    }
}
