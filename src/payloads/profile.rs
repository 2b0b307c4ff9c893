use optional_value::payload;
use serde::Serialize;

use super::{BasePayload, CertificatePayload, MdmPayload, PayloadType, PayloadUuid, ScepPayload};
use crate::plist::Plist;

/// Any payload that can be contained within a profile.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum ProfilePayload {
    Certificate(CertificatePayload),
    Scep(ScepPayload),
    Mdm(MdmPayload),
}

impl ProfilePayload {
    pub fn base(&self) -> &BasePayload {
        match self {
            ProfilePayload::Certificate(payload) => payload.base(),
            ProfilePayload::Scep(payload) => payload.base(),
            ProfilePayload::Mdm(payload) => payload.base(),
        }
    }
}

impl From<CertificatePayload> for ProfilePayload {
    fn from(value: CertificatePayload) -> Self {
        ProfilePayload::Certificate(value)
    }
}

impl From<ScepPayload> for ProfilePayload {
    fn from(value: ScepPayload) -> Self {
        ProfilePayload::Scep(value)
    }
}

impl From<MdmPayload> for ProfilePayload {
    fn from(value: MdmPayload) -> Self {
        ProfilePayload::Mdm(value)
    }
}

#[payload]
/// A profile - the top-level payload, encapsulating all payloads within.
/// https://developer.apple.com/documentation/devicemanagement/toplevel
pub struct Profile {
    #[serde(flatten)]
    base: BasePayload,
    #[serde(rename = "PayloadContent")]
    contents: Vec<ProfilePayload>,
}

impl Profile {
    /// Creates an empty profile. Its UUID is independent of any payload within.
    pub fn new(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Profile {
            base: BasePayload::new(PayloadType::Configuration, identifier, display_name),
            contents: vec![],
        }
    }

    pub fn base(&self) -> &BasePayload {
        &self.base
    }

    /// Permits setting the user-visible organization and description.
    pub fn base_mut(&mut self) -> &mut BasePayload {
        &mut self.base
    }

    pub fn uuid(&self) -> PayloadUuid {
        self.base.uuid()
    }

    /// Adds a payload after all others.
    /// UUIDs are not checked for uniqueness; callers create fresh payloads.
    pub fn append(&mut self, payload: impl Into<ProfilePayload>) {
        self.contents.push(payload.into());
    }

    pub fn payloads(&self) -> &[ProfilePayload] {
        &self.contents
    }

    /// Encodes this profile as an XML property list.
    pub fn to_xml(&self) -> Result<Vec<u8>, plist::Error> {
        Plist(self).to_xml()
    }
}
