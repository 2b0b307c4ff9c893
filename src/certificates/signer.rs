use cms::{
    builder::{SignedDataBuilder, SignerInfoBuilder},
    cert::{CertificateChoices, IssuerAndSerialNumber},
    signed_data::{EncapsulatedContentInfo, SignerIdentifier},
};
use der::{
    Any, Encode, Tag,
    oid::db::{rfc5911, rfc5912},
    referenced::OwnedToRef,
};
use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pkcs1::DecodeRsaPrivateKey,
    pkcs1v15::{Signature, SigningKey},
    pkcs8::DecodePrivateKey,
};
use sha1::Sha1;
use std::fs;
use std::path::Path;
use x509_cert::{Certificate, spki::AlgorithmIdentifierOwned};

use super::{CertificateError, parse_certificate};

/// Signs profiles with the server's TLS certificate, so that devices
/// show them as verified.
#[derive(Clone, Debug)]
pub struct ProfileSigner {
    certificate: Certificate,
    key: RsaPrivateKey,
}

impl ProfileSigner {
    /// Pairs a certificate with its private key.
    /// The certificate must hold the RSA public key matching `key`.
    pub fn new(certificate: Certificate, key: RsaPrivateKey) -> Result<Self, CertificateError> {
        let spki = certificate
            .tbs_certificate
            .subject_public_key_info
            .owned_to_ref();
        let certificate_key = RsaPublicKey::try_from(spki).map_err(|_| {
            CertificateError::Key("certificate does not hold an RSA public key".to_string())
        })?;
        if certificate_key != key.to_public_key() {
            return Err(CertificateError::KeyMismatch);
        }

        Ok(ProfileSigner { certificate, key })
    }

    /// Loads a certificate (PEM or DER) and its RSA private key (PKCS#8 or PKCS#1 PEM).
    pub fn load(certificate_path: &Path, key_path: &Path) -> Result<Self, CertificateError> {
        let certificate = parse_certificate(&read(certificate_path)?)?;

        let key_contents = read(key_path)?;
        let key_pem = String::from_utf8(key_contents)
            .map_err(|_| CertificateError::Key("private key is not PEM".to_string()))?;
        let key = if key_pem.contains("BEGIN RSA PRIVATE KEY") {
            RsaPrivateKey::from_pkcs1_pem(&key_pem)
                .map_err(|err| CertificateError::Key(err.to_string()))?
        } else {
            RsaPrivateKey::from_pkcs8_pem(&key_pem)
                .map_err(|err| CertificateError::Key(err.to_string()))?
        };

        Self::new(certificate, key)
    }

    /// Wraps the given contents within a PKCS#7 SignedData envelope, in DER form.
    pub fn sign(&self, unsigned_contents: &[u8]) -> Result<Vec<u8>, CertificateError> {
        let octet_object = Any::new(Tag::OctetString, unsigned_contents)?;
        let content = EncapsulatedContentInfo {
            econtent_type: rfc5911::ID_DATA,
            econtent: Some(octet_object),
        };

        // We'll be using SHA-1 for backwards compatibility.
        let signer = SigningKey::<Sha1>::new(self.key.clone());
        let digest_algorithm = AlgorithmIdentifierOwned {
            oid: rfc5912::ID_SHA_1,
            parameters: None,
        };

        let signer_info = SignerInfoBuilder::new(
            &signer,
            SignerIdentifier::IssuerAndSerialNumber(IssuerAndSerialNumber {
                issuer: self.certificate.tbs_certificate.issuer.clone(),
                serial_number: self.certificate.tbs_certificate.serial_number.clone(),
            }),
            digest_algorithm.clone(),
            &content,
            None,
        )
        .map_err(signing_error)?;

        let signed_data = SignedDataBuilder::new(&content)
            .add_digest_algorithm(digest_algorithm)
            .map_err(signing_error)?
            .add_certificate(CertificateChoices::Certificate(self.certificate.clone()))
            .map_err(signing_error)?
            .add_signer_info::<SigningKey<Sha1>, Signature>(signer_info)
            .map_err(signing_error)?
            .build()
            .map_err(signing_error)?;

        Ok(signed_data.to_der()?)
    }
}

fn read(path: &Path) -> Result<Vec<u8>, CertificateError> {
    fs::read(path).map_err(|source| CertificateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn signing_error(err: cms::builder::Error) -> CertificateError {
    CertificateError::Signing(format!("{err:?}"))
}
