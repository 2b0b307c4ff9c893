use crate::certificates::{CertificateError, ProfileSigner};
use crate::config::Config;
use crate::enrollment::{EnrollmentError, EnrollmentSettings, ProfileAssembler};
use crate::payloads::Profile;
use crate::routes::ServerUrls;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub assembler: ProfileAssembler,
    pub signer: Option<ProfileSigner>,
}

impl AppState {
    pub fn with_config(config: Config) -> Result<Self, CertificateError> {
        let signer = match config.tls_identity() {
            Some((cert_path, key_path)) => match ProfileSigner::load(cert_path, key_path) {
                Ok(signer) => Some(signer),
                // Profiles can only be signed with RSA keys. Other keys remain usable for TLS.
                // A mismatched RSA pair is still fatal.
                Err(CertificateError::Key(reason)) => {
                    tracing::warn!(%reason, "profiles will not be signed");
                    None
                }
                Err(err) => return Err(err),
            },
            None => None,
        };

        let urls = ServerUrls::new(&config.service.base_domain);
        let assembler = ProfileAssembler::new(EnrollmentSettings::from(&config), urls);

        Ok(AppState {
            config,
            assembler,
            signer,
        })
    }

    /// Encodes the given profile, signing it with our TLS certificate if possible.
    pub fn encode_profile(&self, profile: &Profile) -> Result<Vec<u8>, EnrollmentError> {
        let profile_xml = profile.to_xml()?;

        match &self.signer {
            Some(signer) => signer.sign(&profile_xml).map_err(EnrollmentError::Signing),
            None => Ok(profile_xml),
        }
    }
}
