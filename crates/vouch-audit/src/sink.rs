use std::future::Future;
use std::sync::Arc;

use crate::AuditRecord;
use crate::error::Result;

/// Append-only destination for audit records.
///
/// `append` is a single atomic call: when it returns `Ok` the record is
/// durable, and when it fails nothing may be assumed about the record.
/// Any transactional guarantee beyond that belongs to the implementation.
pub trait AuditSink: Send + Sync {
    /// Persist `record`, returning its journal id.
    fn append(&self, record: &AuditRecord) -> impl Future<Output = Result<u64>> + Send;
}

impl<S: AuditSink> AuditSink for Arc<S> {
    fn append(&self, record: &AuditRecord) -> impl Future<Output = Result<u64>> + Send {
        (**self).append(record)
    }
}
