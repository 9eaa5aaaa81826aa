use serde::{Deserialize, Serialize};

/// One verification outcome, exactly as it was returned to the caller.
///
/// `content` is `None` when it was withheld, so a mismatch leaves no copy of
/// the artifact in the journal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    #[serde(rename = "type")]
    pub kind:    String,
    pub version: String,
    pub hash:    String,
    pub content: Option<String>,
}

/// A record read back from a journal, with its position.
///
/// Only serialized for display; the journal itself stores bare records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id:     u64,
    #[serde(flatten)]
    pub record: AuditRecord,
}
