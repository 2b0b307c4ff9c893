use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid certificate: {0}")]
    Encoding(#[from] der::Error),

    #[error("push certificate subject has no UID to use as a topic")]
    MissingTopic,

    #[error("invalid private key: {0}")]
    Key(String),

    #[error("private key does not match the certificate's public key")]
    KeyMismatch,

    #[error("unable to sign profile: {0}")]
    Signing(String),
}
