use std::path::PathBuf;

use super::EnrollmentError;
use crate::config::{Config, Organization, ScepConfig};

/// Everything the assembler needs, loaded once from configuration.
#[derive(Clone, Debug)]
pub struct EnrollmentSettings {
    pub organizations: Vec<Organization>,
    pub scep: Vec<ScepConfig>,
    pub push_certificate: PathBuf,
    pub ssl_certificate: Option<PathBuf>,
}

impl From<&Config> for EnrollmentSettings {
    fn from(config: &Config) -> Self {
        EnrollmentSettings {
            organizations: config.organizations.clone(),
            scep: config.scep.clone(),
            push_certificate: config.certificates.push_certificate.clone(),
            ssl_certificate: config.certificates.ssl_certificate.clone(),
        }
    }
}

impl EnrollmentSettings {
    /// The single configured organization.
    pub fn organization(&self) -> Result<&Organization, EnrollmentError> {
        match self.organizations.as_slice() {
            [] => Err(EnrollmentError::NoOrganization),
            [organization] => Ok(organization),
            _ => Err(EnrollmentError::MultipleOrganizations),
        }
    }

    /// The single configured SCEP server, with a URL.
    pub fn scep_config(&self) -> Result<&ScepConfig, EnrollmentError> {
        match self.scep.as_slice() {
            [] => Err(EnrollmentError::NoScepConfig),
            [scep] if scep.url.trim().is_empty() => Err(EnrollmentError::MissingScepUrl),
            [scep] => Ok(scep),
            _ => Err(EnrollmentError::MultipleScepConfigs),
        }
    }

    /// Checks everything that does not require reading certificates.
    pub fn validate(&self) -> Result<(), EnrollmentError> {
        let organization = self.organization()?;
        self.scep_config()?;
        if organization.payload_prefix.is_empty() {
            return Err(EnrollmentError::MissingPayloadPrefix);
        }
        Ok(())
    }
}
