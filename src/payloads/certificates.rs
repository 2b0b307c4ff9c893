use optional_value::payload;

use super::{BasePayload, PayloadType, PayloadUuid};

#[payload]
/// Embeds a certificate within a profile.
/// https://developer.apple.com/documentation/devicemanagement/certificatepem
pub struct CertificatePayload {
    #[serde(flatten)]
    base: BasePayload,
    #[serde(rename = "PayloadCertificateFileName")]
    pub file_name: Option<String>,
    #[serde(rename = "PayloadContent", with = "serde_bytes")]
    certificate: Vec<u8>,
}

impl CertificatePayload {
    /// A certificate in PEM form.
    pub fn pem(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        certificate: Vec<u8>,
    ) -> Self {
        Self::with_type(PayloadType::CertificatePem, identifier, display_name, certificate)
    }

    /// A DER-encoded root certificate, to be trusted by the device.
    pub fn root(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        certificate: Vec<u8>,
    ) -> Self {
        Self::with_type(PayloadType::CertificateRoot, identifier, display_name, certificate)
    }

    /// A DER-encoded certificate.
    pub fn pkcs1(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        certificate: Vec<u8>,
    ) -> Self {
        Self::with_type(PayloadType::CertificatePkcs1, identifier, display_name, certificate)
    }

    /// Picks the PEM or DER payload type based on the given contents.
    pub fn from_bytes(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        certificate: Vec<u8>,
    ) -> Self {
        if certificate.trim_ascii_start().starts_with(b"-----BEGIN") {
            Self::pem(identifier, display_name, certificate)
        } else {
            Self::pkcs1(identifier, display_name, certificate)
        }
    }

    fn with_type(
        payload_type: PayloadType,
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        certificate: Vec<u8>,
    ) -> Self {
        CertificatePayload {
            base: BasePayload::new(payload_type, identifier, display_name),
            file_name: None,
            certificate,
        }
    }

    pub fn base(&self) -> &BasePayload {
        &self.base
    }

    pub fn uuid(&self) -> PayloadUuid {
        self.base.uuid()
    }

    pub fn certificate(&self) -> &[u8] {
        &self.certificate
    }
}
