use serde::{Deserialize, Serialize};

/// A single key/value pair stored by the configuration service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub key: String,
    #[serde(default)]
    pub value: String,
    /// Last modification time as sent by the service (RFC 3339 when present).
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Environment echoed back by the service; not needed for display.
    #[serde(default, rename = "env", skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            updated_at: None,
            environment: None,
        }
    }
}

/// Request body for create and update: `{"value": "..."}`.
#[derive(Debug, Serialize)]
pub(crate) struct ValueBody<'a> {
    pub value: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_service_payload() {
        let json = r#"{"env":"prod","key":"a","value":"b","updated_at":"2024-05-01T10:00:00Z"}"#;
        let entry: ConfigEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.key, "a");
        assert_eq!(entry.value, "b");
        assert_eq!(entry.updated_at.as_deref(), Some("2024-05-01T10:00:00Z"));
        assert_eq!(entry.environment.as_deref(), Some("prod"));
    }

    #[test]
    fn missing_timestamp_is_none() {
        let entry: ConfigEntry = serde_json::from_str(r#"{"key":"a","value":"b"}"#).unwrap();
        assert_eq!(entry, ConfigEntry::new("a", "b"));
    }

    #[test]
    fn null_timestamp_is_none() {
        let entry: ConfigEntry =
            serde_json::from_str(r#"{"key":"a","value":"b","updated_at":null}"#).unwrap();
        assert!(entry.updated_at.is_none());
    }

    #[test]
    fn value_body_serializes() {
        let json = serde_json::to_string(&ValueBody { value: "secret" }).unwrap();
        assert_eq!(json, r#"{"value":"secret"}"#);
    }
}
