//! Append-only audit journal for verification outcomes.
//!
//! Records are written once and never updated or removed through this crate.

mod error;
mod journal;
mod memory;
mod record;
mod sink;

pub use error::{AuditError, Result};
pub use journal::{DbKeys, SledAuditLog};
pub use memory::MemoryAuditLog;
pub use record::{AuditEntry, AuditRecord};
pub use sink::AuditSink;
