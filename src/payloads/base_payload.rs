use optional_value::payload;
use serde::{Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

use super::PayloadType;

/// The UUID of a payload, used by other payloads to refer to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PayloadUuid(Uuid);

impl PayloadUuid {
    /// Every call produces a fresh random UUID.
    pub fn generate() -> Self {
        PayloadUuid(Uuid::new_v4())
    }
}

impl fmt::Display for PayloadUuid {
    // Profiles conventionally carry upper-case UUIDs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

impl Serialize for PayloadUuid {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_str(self)
    }
}

#[payload]
/// Common keys across all payloads.
/// https://developer.apple.com/documentation/devicemanagement/commonpayloadkeys
pub struct BasePayload {
    #[serde(rename = "PayloadDescription")]
    /// The description of this payload - user visible.
    pub description: Option<String>,
    #[serde(rename = "PayloadDisplayName")]
    /// The name this payload is displayed as - user visible.
    pub display_name: Option<String>,
    #[serde(rename = "PayloadIdentifier")]
    /// The identifier of this payload, in reverse domain notation.
    identifier: String,
    #[serde(rename = "PayloadOrganization")]
    /// The name of the organization this payload represents - user-visible.
    pub organization: Option<String>,
    #[serde(rename = "PayloadType")]
    payload_type: PayloadType,
    #[serde(rename = "PayloadUUID")]
    /// Each payload must have a unique UUID.
    uuid: PayloadUuid,
    #[serde(rename = "PayloadVersion")]
    /// Every payload's version is 1.
    version: isize,
}

impl BasePayload {
    /// Creates the common keys for a payload of the given type,
    /// assigning it a new UUID.
    pub fn new(
        payload_type: PayloadType,
        identifier: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        BasePayload {
            description: None,
            display_name: Some(display_name.into()),
            identifier: identifier.into(),
            organization: None,
            payload_type,
            uuid: PayloadUuid::generate(),
            version: 1,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn payload_type(&self) -> PayloadType {
        self.payload_type
    }

    pub fn uuid(&self) -> PayloadUuid {
        self.uuid
    }
}
