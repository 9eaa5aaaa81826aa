use std::sync::{Mutex, PoisonError};

use crate::error::Result;
use crate::{AuditEntry, AuditRecord, AuditSink};

/// Volatile journal kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self { Self::default() }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.records()
            .into_iter()
            .enumerate()
            .map(|(id, record)| AuditEntry {
                id: id as u64,
                record,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl AuditSink for MemoryAuditLog {
    async fn append(&self, record: &AuditRecord) -> Result<u64> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.push(record.clone());
        Ok(records.len() as u64 - 1)
    }
}
