use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use thiserror::Error;

use crate::certificates::CertificateError;

/// Any condition preventing an enrollment profile from being generated.
/// None of these are retried: the request fails as a whole.
#[derive(Debug, Error)]
pub enum EnrollmentError {
    #[error("No organization is configured, cannot generate enrollment profile.")]
    NoOrganization,

    #[error("Multiple organizations are configured, cannot generate enrollment profile.")]
    MultipleOrganizations,

    #[error("No SCEP Configuration found, cannot generate enrollment profile.")]
    NoScepConfig,

    #[error("Multiple SCEP configurations are present, cannot generate enrollment profile.")]
    MultipleScepConfigs,

    #[error("SCEP Configuration has no URL, cannot generate enrollment profile.")]
    MissingScepUrl,

    #[error("No push certificate available at: {}", path.display())]
    MissingPushCertificate { path: PathBuf },

    #[error("Unable to use push certificate at {}: {source}", path.display())]
    InvalidPushCertificate {
        path: PathBuf,
        source: CertificateError,
    },

    #[error("MDM configuration has no profile prefix")]
    MissingPayloadPrefix,

    #[error("No web server certificate available at: {}", path.display())]
    MissingTlsCertificate { path: PathBuf },

    #[error("Unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to encode profile: {0}")]
    Serialization(#[from] plist::Error),

    #[error("unable to sign profile: {0}")]
    Signing(#[source] CertificateError),

    #[error("profile generation was interrupted: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl EnrollmentError {
    /// Whether this is an operator-facing configuration problem,
    /// as opposed to a failure we should not describe to clients.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            EnrollmentError::Serialization(_)
                | EnrollmentError::Signing(_)
                | EnrollmentError::Task(_)
        )
    }
}

impl IntoResponse for EnrollmentError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "unable to generate enrollment profile");

        let body = if self.is_configuration() {
            self.to_string()
        } else {
            // We should not expose this exact error for safety reasons.
            "Internal Server Error".to_string()
        };
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
