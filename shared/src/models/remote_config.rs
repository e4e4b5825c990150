//! Payload of the external config provider

use serde::{Deserialize, Serialize};

/// Configuration served by the remote config endpoint
///
/// Any field may be absent; consumers fall back to locally configured
/// values. The admin password arrives as the provider stores it and is
/// hashed before use, never compared in plaintext.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(rename = "sheetId", default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<String>,
    #[serde(rename = "apiKey", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(
        rename = "adminPassword",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub admin_password: Option<String>,
}

impl RemoteConfig {
    /// Whether the payload carries sheet connection parameters
    pub fn has_sheet_config(&self) -> bool {
        self.sheet_id.is_some() && self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let raw = r#"{"sheetId":"abc","apiKey":"key","adminPassword":"pw"}"#;
        let cfg: RemoteConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(cfg.sheet_id.as_deref(), Some("abc"));
        assert!(cfg.has_sheet_config());
    }

    #[test]
    fn test_partial_payload() {
        let cfg: RemoteConfig = serde_json::from_str(r#"{"sheetId":"abc"}"#).unwrap();
        assert!(!cfg.has_sheet_config());
        assert!(cfg.admin_password.is_none());
    }
}
