use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use super::{EnrollmentError, EnrollmentSettings};
use crate::certificates::PushCertificate;
use crate::config::ScepConfig;
use crate::payloads::{
    AccessRights, CertificatePayload, MdmPayload, PER_USER_CONNECTIONS, Profile, ScepContent,
    ScepPayload, hardware_uuid_subject,
};
use crate::routes::ServerUrls;

/// Composes the enrollment profile handed to devices.
///
/// The profile contains, in order: our web server certificate (if configured),
/// a SCEP payload for the device identity, and the MDM payload using that identity.
#[derive(Clone, Debug)]
pub struct ProfileAssembler {
    settings: Arc<EnrollmentSettings>,
    urls: ServerUrls,
}

impl ProfileAssembler {
    pub fn new(settings: EnrollmentSettings, urls: ServerUrls) -> Self {
        ProfileAssembler {
            settings: Arc::new(settings),
            urls,
        }
    }

    pub fn settings(&self) -> &EnrollmentSettings {
        &self.settings
    }

    pub fn urls(&self) -> &ServerUrls {
        &self.urls
    }

    /// Builds a new profile. Every payload, and the profile itself, has a fresh UUID.
    pub fn assemble(&self) -> Result<Profile, EnrollmentError> {
        let organization = self.settings.organization()?;
        let scep_config = self.settings.scep_config()?;
        let push_certificate = self.load_push_certificate()?;

        let prefix = organization.payload_prefix.as_str();
        if prefix.is_empty() {
            return Err(EnrollmentError::MissingPayloadPrefix);
        }

        let mut profile = Profile::new(format!("{prefix}.enroll"), &organization.name);
        profile.base_mut().description = organization.description.clone();

        // Devices must trust our web server before talking to it.
        if let Some(path) = &self.settings.ssl_certificate {
            let certificate = read_tls_certificate(path)?;
            let mut payload = CertificatePayload::from_bytes(
                format!("{prefix}.ssl"),
                "Web Server Certificate",
                certificate,
            );
            payload.file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
            profile.append(payload);
        }

        let scep_payload = ScepPayload::new(
            format!("{prefix}.mdm-scep"),
            "MDM SCEP",
            scep_content(scep_config),
        );
        let identity_uuid = scep_payload.uuid();
        profile.append(scep_payload);

        let mut mdm_payload = MdmPayload::new(
            format!("{prefix}.mdm"),
            "Device Configuration and Management",
            identity_uuid,
            push_certificate.topic,
            self.urls.mdm_url(),
            AccessRights::ALL,
        );
        mdm_payload.check_in_url = Some(self.urls.check_in_url());
        // Devices sign their messages within an HTTP header,
        // so we need not verify client certificates during TLS.
        mdm_payload.sign_message = Some(true);
        mdm_payload.check_out_when_removed = Some(true);
        mdm_payload.server_capabilities = vec![PER_USER_CONNECTIONS.to_string()];
        profile.append(mdm_payload);

        tracing::info!(
            identifier = profile.base().identifier(),
            payloads = profile.payloads().len(),
            "assembled enrollment profile"
        );
        Ok(profile)
    }

    fn load_push_certificate(&self) -> Result<PushCertificate, EnrollmentError> {
        let path = &self.settings.push_certificate;
        let contents = fs::read(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => EnrollmentError::MissingPushCertificate { path: path.clone() },
            _ => EnrollmentError::Io {
                path: path.clone(),
                source,
            },
        })?;

        PushCertificate::from_bytes(contents).map_err(|source| {
            EnrollmentError::InvalidPushCertificate {
                path: path.clone(),
                source,
            }
        })
    }
}

/// A configured path without a file is an error, rather than being skipped.
fn read_tls_certificate(path: &Path) -> Result<Vec<u8>, EnrollmentError> {
    fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => EnrollmentError::MissingTlsCertificate {
            path: path.to_path_buf(),
        },
        _ => EnrollmentError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

fn scep_content(config: &ScepConfig) -> ScepContent {
    // The device substitutes its own hardware UUID.
    let mut content = ScepContent::new(&config.url).with_subject(hardware_uuid_subject());
    content.name = config.name.clone();
    content.challenge = config.challenge.clone();
    if let Some(key_size) = config.key_size {
        content.key_size = key_size;
    }
    content.key_usage = config.key_usage;
    content.retries = config.retries;
    content.retry_delay = config.retry_delay;
    content
}
