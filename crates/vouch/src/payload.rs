use serde::{Deserialize, Serialize};
use vouch_audit::AuditRecord;

pub const DEFAULT_TYPE: &str = "core";
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Wire request: `{ "type"?, "version"?, "hash"? }`.
///
/// Missing, `null` and empty fields all mean "not supplied". Unknown fields
/// are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind:          Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version:       Option<String>,
    #[serde(rename = "hash", default, skip_serializing_if = "Option::is_none")]
    pub expected_hash: Option<String>,
}

impl VerificationRequest {
    pub fn new() -> Self { Self::default() }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn expected_hash(mut self, hash: impl Into<String>) -> Self {
        self.expected_hash = Some(hash.into());
        self
    }

    pub fn kind_or_default(&self) -> &str { non_empty(&self.kind).unwrap_or(DEFAULT_TYPE) }

    pub fn version_or_default(&self) -> &str { non_empty(&self.version).unwrap_or(DEFAULT_VERSION) }

    /// The digest the caller pinned, if any. An empty string pins nothing.
    pub fn pinned_hash(&self) -> Option<&str> { non_empty(&self.expected_hash) }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Wire response: `{ "type", "version", "hash", "content"? }`.
///
/// `content` is present only when no digest was pinned or the pinned digest
/// equals `hash`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResponse {
    #[serde(rename = "type")]
    pub kind:    String,
    pub version: String,
    pub hash:    String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl VerificationResponse {
    pub fn is_disclosed(&self) -> bool { self.content.is_some() }
}

impl From<&VerificationResponse> for AuditRecord {
    fn from(response: &VerificationResponse) -> Self {
        AuditRecord {
            kind:    response.kind.clone(),
            version: response.version.clone(),
            hash:    response.hash.clone(),
            content: response.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request: VerificationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.kind_or_default(), "core");
        assert_eq!(request.version_or_default(), "1.0.0");
        assert_eq!(request.pinned_hash(), None);
    }

    #[test]
    fn test_empty_and_null_fields_fall_back() {
        let request: VerificationRequest =
            serde_json::from_str(r#"{"type":"","version":null,"hash":""}"#).unwrap();
        assert_eq!(request.kind_or_default(), "core");
        assert_eq!(request.version_or_default(), "1.0.0");
        assert_eq!(request.pinned_hash(), None);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let request: VerificationRequest =
            serde_json::from_str(r#"{"type":"maps","version":"2","hash":"ab","extra":1}"#).unwrap();
        assert_eq!(request, VerificationRequest::new().kind("maps").version("2").expected_hash("ab"));
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        assert!(serde_json::from_str::<VerificationRequest>(r#"{"type":5}"#).is_err());
        assert!(serde_json::from_str::<VerificationRequest>("not json").is_err());
    }

    #[test]
    fn test_withheld_content_is_omitted() {
        let response = VerificationResponse {
            kind:    "core".into(),
            version: "1.0.0".into(),
            hash:    "abc".into(),
            content: None,
        };
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"type":"core","version":"1.0.0","hash":"abc"}"#
        );
    }

    #[test]
    fn test_audit_record_mirrors_response() {
        let response = VerificationResponse {
            kind:    "core".into(),
            version: "1.0.0".into(),
            hash:    "abc".into(),
            content: Some("file content".into()),
        };
        let record = AuditRecord::from(&response);
        assert_eq!(record.kind, response.kind);
        assert_eq!(record.version, response.version);
        assert_eq!(record.hash, response.hash);
        assert_eq!(record.content, response.content);
    }
}
