use optional_value::payload;

use super::{BasePayload, PayloadType, PayloadUuid};

/// 2048 bits is strong enough while still being compatible with older devices.
pub const DEFAULT_KEY_SIZE: u32 = 2048;

/// Substituted by the device with its own hardware UUID.
pub const HARDWARE_UUID_PLACEHOLDER: &str = "%HardwareUUID%";

/// A subject name, as an array of relative distinguished names,
/// each an array of (type, value) pairs.
pub type Subject = Vec<Vec<(String, String)>>;

/// A subject with a single common name of the device's hardware UUID.
pub fn hardware_uuid_subject() -> Subject {
    vec![vec![(
        "CN".to_string(),
        HARDWARE_UUID_PLACEHOLDER.to_string(),
    )]]
}

#[payload]
/// Requests a certificate from a SCEP server.
/// https://developer.apple.com/documentation/devicemanagement/scep
pub struct ScepPayload {
    #[serde(flatten)]
    base: BasePayload,
    #[serde(rename = "PayloadContent")]
    content: ScepContent,
}

#[payload]
/// The enrollment parameters the device uses against the SCEP server.
pub struct ScepContent {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Name")]
    /// Sent as the `message` query parameter for GetCACert/GetCACaps.
    pub name: Option<String>,
    #[serde(rename = "Subject")]
    #[omit_empty]
    pub subject: Vec<Vec<(String, String)>>,
    #[serde(rename = "Challenge")]
    pub challenge: Option<String>,
    #[serde(rename = "Keysize")]
    pub key_size: u32,
    #[serde(rename = "Key Type")]
    pub key_type: String,
    #[serde(rename = "Key Usage")]
    /// 1 for signing, 4 for encryption, 5 for both.
    pub key_usage: Option<u32>,
    #[serde(rename = "Retries")]
    pub retries: Option<u32>,
    #[serde(rename = "RetryDelay")]
    pub retry_delay: Option<u32>,
}

impl ScepContent {
    /// Parameters for an RSA key of the default size, without a subject.
    pub fn new(url: impl Into<String>) -> Self {
        ScepContent {
            url: url.into(),
            name: None,
            subject: Subject::new(),
            challenge: None,
            key_size: DEFAULT_KEY_SIZE,
            key_type: "RSA".to_string(),
            key_usage: None,
            retries: None,
            retry_delay: None,
        }
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subject = subject;
        self
    }
}

impl ScepPayload {
    pub fn new(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        content: ScepContent,
    ) -> Self {
        ScepPayload {
            base: BasePayload::new(PayloadType::Scep, identifier, display_name),
            content,
        }
    }

    pub fn base(&self) -> &BasePayload {
        &self.base
    }

    /// The UUID the MDM payload refers to as its identity certificate.
    pub fn uuid(&self) -> PayloadUuid {
        self.base.uuid()
    }

    pub fn content(&self) -> &ScepContent {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plist::Value;

    fn rendered_content(payload: &ScepPayload) -> plist::Dictionary {
        let value = plist::to_value(payload).expect("should serialize");
        let dict = value.into_dictionary().expect("should be a dictionary");
        dict.get("PayloadContent")
            .and_then(|v| v.as_dictionary())
            .cloned()
            .expect("should have PayloadContent")
    }

    #[test]
    fn renders_enrollment_parameters() {
        let content =
            ScepContent::new("https://scep.acme.com").with_subject(hardware_uuid_subject());
        let payload = ScepPayload::new("com.acme.mdm-scep", "MDM SCEP", content);
        let content = rendered_content(&payload);

        assert_eq!(
            content.get("URL").and_then(|v| v.as_string()),
            Some("https://scep.acme.com")
        );
        assert_eq!(
            content.get("Keysize").and_then(|v| v.as_unsigned_integer()),
            Some(2048)
        );
        assert_eq!(content.get("Key Type").and_then(|v| v.as_string()), Some("RSA"));

        let expected_subject = Value::Array(vec![Value::Array(vec![Value::Array(vec![
            Value::String("CN".to_string()),
            Value::String("%HardwareUUID%".to_string()),
        ])])]);
        assert_eq!(content.get("Subject"), Some(&expected_subject));

        for absent in ["Name", "Challenge", "Key Usage", "Retries", "RetryDelay"] {
            assert!(content.get(absent).is_none(), "{absent} should be omitted");
        }
    }

    #[test]
    fn optional_parameters_are_emitted_when_set() {
        let mut content = ScepContent::new("https://scep.acme.com");
        content.name = Some("Device CA".to_string());
        content.challenge = Some("secret".to_string());
        content.key_usage = Some(5);
        let payload = ScepPayload::new("com.acme.mdm-scep", "MDM SCEP", content);
        let content = rendered_content(&payload);

        assert_eq!(content.get("Name").and_then(|v| v.as_string()), Some("Device CA"));
        assert_eq!(content.get("Challenge").and_then(|v| v.as_string()), Some("secret"));
        assert_eq!(
            content.get("Key Usage").and_then(|v| v.as_unsigned_integer()),
            Some(5)
        );
        // No subject was given.
        assert!(content.get("Subject").is_none());
    }
}
