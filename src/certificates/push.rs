use der::{Decode, DecodePem, asn1::ObjectIdentifier};
use x509_cert::Certificate;

use super::CertificateError;

/// The userId attribute. Apple places the APNs topic within it.
pub const UID: ObjectIdentifier = ObjectIdentifier::new_unwrap("0.9.2342.19200300.100.1.1");

/// The APNs certificate used to wake devices.
#[derive(Clone, Debug)]
pub struct PushCertificate {
    pub contents: Vec<u8>,
    /// Devices subscribe to this topic, and MDM payloads must specify it.
    pub topic: String,
}

impl PushCertificate {
    /// Parses the given certificate, in either PEM or DER form.
    pub fn from_bytes(contents: Vec<u8>) -> Result<Self, CertificateError> {
        let certificate = parse_certificate(&contents)?;
        let topic = subject_uid(&certificate).ok_or(CertificateError::MissingTopic)?;

        Ok(PushCertificate { contents, topic })
    }
}

/// Parses a certificate in either PEM or DER form.
pub fn parse_certificate(contents: &[u8]) -> Result<Certificate, CertificateError> {
    let certificate = if contents.trim_ascii_start().starts_with(b"-----BEGIN") {
        Certificate::from_pem(contents)?
    } else {
        Certificate::from_der(contents)?
    };
    Ok(certificate)
}

fn subject_uid(certificate: &Certificate) -> Option<String> {
    // UID is a directory string: its contents are UTF-8 for every
    // string type a push certificate may use.
    certificate
        .tbs_certificate
        .subject
        .0
        .iter()
        .flat_map(|rdn| rdn.0.iter())
        .find(|attribute| attribute.oid == UID)
        .and_then(|attribute| std::str::from_utf8(attribute.value.value()).ok())
        .map(str::to_owned)
}
