//! Helpers shared by tests: throwaway directories, and generated certificates.

use cms::{content_info::ContentInfo, signed_data::SignedData};
use der::{Decode, Encode, EncodePem, pem::LineEnding};
use rcgen::{CertificateParams, DistinguishedName, DnType, DnValue, KeyPair};
use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pkcs1v15::{Signature, SigningKey, VerifyingKey},
    sha2::Sha256,
    signature::Verifier,
};
use sha1::Sha1;
use std::fmt::{self, Debug};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;
use x509_cert::{
    Certificate,
    builder::{Builder, CertificateBuilder, Profile},
    name::Name,
    serial_number::SerialNumber,
    spki::SubjectPublicKeyInfoOwned,
    time::Validity,
};

/// The userId attribute's OID, in rcgen's form.
const UID_ARCS: [u64; 7] = [0, 9, 2342, 19200300, 100, 1, 1];

/// A directory beneath the system temporary directory, removed on drop.
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("mdm-enroll-{}", Uuid::new_v4()));
        fs::create_dir_all(&path).expect("should be able to create temporary directory");
        TempDir { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes a file within this directory, returning its path.
    pub fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.path.join(name);
        fs::write(&path, contents).expect("should be able to write file");
        path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

impl Debug for TempDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.path, f)
    }
}

impl AsRef<Path> for TempDir {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

fn push_certificate(topic: &str) -> rcgen::Certificate {
    let mut params = CertificateParams::new(Vec::<String>::new()).expect("should create params");
    let mut name = DistinguishedName::new();
    name.push(
        DnType::CustomDnType(UID_ARCS.to_vec()),
        DnValue::Utf8String(topic.to_string()),
    );
    name.push(DnType::CommonName, format!("APSP:{topic}"));
    params.distinguished_name = name;

    let key = KeyPair::generate().expect("should generate key");
    params.self_signed(&key).expect("should self-sign")
}

/// A push certificate for the given topic, in PEM form.
pub fn push_certificate_pem(topic: &str) -> String {
    push_certificate(topic).pem()
}

/// A push certificate for the given topic, in DER form.
pub fn push_certificate_der(topic: &str) -> Vec<u8> {
    push_certificate(topic).der().to_vec()
}

/// A web server certificate and its key, both in PEM form.
pub fn tls_certificate_pem() -> (String, String) {
    let params = CertificateParams::new(vec!["mdm.acme.com".to_string()])
        .expect("should create params");
    let key = KeyPair::generate().expect("should generate key");
    let certificate = params.self_signed(&key).expect("should self-sign");
    (certificate.pem(), key.serialize_pem())
}

/// A small RSA key, quick enough to generate within tests.
pub fn rsa_key() -> RsaPrivateKey {
    RsaPrivateKey::new(&mut rsa::rand_core::OsRng, 1024).expect("should generate RSA key")
}

/// A self-signed web server certificate for the given RSA key.
pub fn rsa_certificate(key: &RsaPrivateKey) -> Certificate {
    let subject = Name::from_str("CN=mdm.acme.com,O=Acme").expect("should parse name");
    let public_key =
        SubjectPublicKeyInfoOwned::from_key(key.to_public_key()).expect("should encode key");
    let validity = Validity::from_now(Duration::from_secs(3600)).expect("should create validity");
    let signer = SigningKey::<Sha256>::new(key.clone());

    CertificateBuilder::new(
        Profile::Root,
        SerialNumber::from(42u32),
        validity,
        subject,
        public_key,
        &signer,
    )
    .expect("should create builder")
    .build::<Signature>()
    .expect("should self-sign")
}

/// An RSA key and its certificate, the latter in PEM form.
pub fn rsa_identity_pem() -> (RsaPrivateKey, String) {
    let key = rsa_key();
    let certificate = rsa_certificate(&key)
        .to_pem(LineEnding::LF)
        .expect("should encode certificate");
    (key, certificate)
}

/// Checks the single signer's signature with the given key,
/// returning the encapsulated contents.
pub fn verify_signed(signed: &[u8], public_key: RsaPublicKey) -> Vec<u8> {
    let content_info = ContentInfo::from_der(signed).expect("should be a ContentInfo");
    let signed_data = content_info
        .content
        .to_der()
        .and_then(|der| SignedData::from_der(&der))
        .expect("should be SignedData");
    let contents = signed_data
        .encap_content_info
        .econtent
        .as_ref()
        .map(|econtent| econtent.value().to_vec())
        .expect("should have content");

    let signer_info = signed_data
        .signer_infos
        .0
        .iter()
        .next()
        .expect("should have a signer");
    // With signed attributes present, their DER encoding is what was signed.
    let message = match &signer_info.signed_attrs {
        Some(attributes) => attributes.to_der().expect("should encode attributes"),
        None => contents.clone(),
    };
    let signature =
        Signature::try_from(signer_info.signature.as_bytes()).expect("should be a signature");
    VerifyingKey::<Sha1>::new(public_key)
        .verify(&message, &signature)
        .expect("signature should verify");

    contents
}
