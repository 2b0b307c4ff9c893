use optional_value::payload;
use serde::Serialize;
use std::ops::BitOr;

use super::{BasePayload, PayloadType, PayloadUuid};

/// Rights granted to the MDM server over the enrolled device.
/// https://developer.apple.com/documentation/devicemanagement/mdm
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccessRights(u32);

impl AccessRights {
    pub const PROFILE_INSPECTION: Self = AccessRights(1 << 0);
    pub const PROFILE_INSTALL_REMOVE: Self = AccessRights(1 << 1);
    pub const DEVICE_LOCK: Self = AccessRights(1 << 2);
    pub const DEVICE_ERASE: Self = AccessRights(1 << 3);
    pub const QUERY_DEVICE_INFO: Self = AccessRights(1 << 4);
    pub const QUERY_NETWORK_INFO: Self = AccessRights(1 << 5);
    pub const PROVISIONING_PROFILE_INSPECTION: Self = AccessRights(1 << 6);
    pub const PROVISIONING_PROFILE_INSTALL_REMOVE: Self = AccessRights(1 << 7);
    pub const MANAGED_APP_INSPECTION: Self = AccessRights(1 << 8);
    pub const RESTRICTION_QUERY: Self = AccessRights(1 << 9);
    pub const SECURITY_QUERY: Self = AccessRights(1 << 10);
    pub const CHANGE_SETTINGS: Self = AccessRights(1 << 11);
    pub const MANAGE_APPS: Self = AccessRights(1 << 12);
    /// Every right above.
    pub const ALL: Self = AccessRights(8191);
}

impl BitOr for AccessRights {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        AccessRights(self.0 | rhs.0)
    }
}

/// Permits the server to establish connections per user.
pub const PER_USER_CONNECTIONS: &str = "com.apple.mdm.per-user-connections";

#[payload]
/// Enrolls the device into the MDM server.
///
/// The identity certificate is never embedded: the payload refers to
/// the SCEP payload that provides it by UUID.
pub struct MdmPayload {
    #[serde(flatten)]
    base: BasePayload,
    #[serde(rename = "IdentityCertificateUUID")]
    identity_certificate_uuid: PayloadUuid,
    #[serde(rename = "Topic")]
    /// The APNs push topic, from the push certificate.
    pub topic: String,
    #[serde(rename = "ServerURL")]
    pub server_url: String,
    #[serde(rename = "AccessRights")]
    pub access_rights: AccessRights,
    #[serde(rename = "CheckInURL")]
    pub check_in_url: Option<String>,
    #[serde(rename = "SignMessage")]
    /// Whether the device signs its messages within an HTTP header.
    pub sign_message: Option<bool>,
    #[serde(rename = "CheckOutWhenRemoved")]
    pub check_out_when_removed: Option<bool>,
    #[serde(rename = "ServerCapabilities")]
    #[omit_empty]
    pub server_capabilities: Vec<String>,
}

impl MdmPayload {
    pub fn new(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        identity_certificate_uuid: PayloadUuid,
        topic: impl Into<String>,
        server_url: impl Into<String>,
        access_rights: AccessRights,
    ) -> Self {
        MdmPayload {
            base: BasePayload::new(PayloadType::Mdm, identifier, display_name),
            identity_certificate_uuid,
            topic: topic.into(),
            server_url: server_url.into(),
            access_rights,
            check_in_url: None,
            sign_message: None,
            check_out_when_removed: None,
            server_capabilities: vec![],
        }
    }

    pub fn base(&self) -> &BasePayload {
        &self.base
    }

    pub fn uuid(&self) -> PayloadUuid {
        self.base.uuid()
    }

    pub fn identity_certificate_uuid(&self) -> PayloadUuid {
        self.identity_certificate_uuid
    }
}
