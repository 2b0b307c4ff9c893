use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "&str")]
pub enum PayloadType {
    Configuration,
    /// A certificate in PEM form.
    CertificatePem,
    /// A DER-encoded root certificate.
    CertificateRoot,
    /// A DER-encoded certificate.
    CertificatePkcs1,
    Scep,
    Mdm,
}

impl From<PayloadType> for &str {
    fn from(value: PayloadType) -> Self {
        match value {
            PayloadType::Configuration => "Configuration",
            PayloadType::CertificatePem => "com.apple.security.pem",
            PayloadType::CertificateRoot => "com.apple.security.root",
            PayloadType::CertificatePkcs1 => "com.apple.security.pkcs1",
            PayloadType::Scep => "com.apple.security.scep",
            PayloadType::Mdm => "com.apple.mdm",
        }
    }
}
