mod error;
mod push;
mod signer;

pub use error::CertificateError;
pub use push::{PushCertificate, parse_certificate};
pub use signer::ProfileSigner;
