use std::path::Path;

use crate::error::{AuditError, Result};
use crate::{AuditEntry, AuditRecord, AuditSink};

/// Audit journal backed by a sled database.
///
/// Records are postcard-encoded under `audit:<hex id>` keys. Ids come from
/// sled's monotonic generator, so key order is append order.
#[derive(Clone)]
pub struct SledAuditLog {
    db: sled::Db,
}

pub struct DbKeys;

impl DbKeys {
    const RECORD_PREFIX: &'static str = "audit:";

    pub fn record_key(id: u64) -> Vec<u8> {
        format!("{}{}", Self::RECORD_PREFIX, hex::encode(id.to_be_bytes())).into_bytes()
    }

    pub fn record_prefix() -> &'static [u8] { Self::RECORD_PREFIX.as_bytes() }

    pub fn record_id(key: &[u8]) -> Result<u64> {
        let corrupt = || AuditError::CorruptKey(String::from_utf8_lossy(key).into_owned());
        let hex_id = key.strip_prefix(Self::record_prefix()).ok_or_else(corrupt)?;
        let raw = hex::decode(hex_id).map_err(|_| corrupt())?;
        let bytes: [u8; 8] = raw.try_into().map_err(|_| corrupt())?;
        Ok(u64::from_be_bytes(bytes))
    }
}

impl SledAuditLog {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// A journal that is deleted when dropped.
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }

    pub fn len(&self) -> usize { self.db.scan_prefix(DbKeys::record_prefix()).count() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn get(&self, id: u64) -> Result<Option<AuditRecord>> {
        let data = self.db.get(DbKeys::record_key(id))?;
        if let Some(data) = data {
            let record = postcard::from_bytes(&data)?;
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }

    /// All entries in append order.
    pub fn entries(&self) -> Result<Vec<AuditEntry>> {
        self.db
            .scan_prefix(DbKeys::record_prefix())
            .map(|entry| decode_entry(entry?))
            .collect()
    }

    /// The newest `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<AuditEntry>> {
        self.db
            .scan_prefix(DbKeys::record_prefix())
            .rev()
            .take(limit)
            .map(|entry| decode_entry(entry?))
            .collect()
    }

    fn append_blocking(&self, record: &AuditRecord) -> Result<u64> {
        let id = self.db.generate_id()?;
        let val = postcard::to_stdvec(record)?;
        self.db.insert(DbKeys::record_key(id), val)?;
        self.db.flush()?;
        Ok(id)
    }
}

fn decode_entry((key, val): (sled::IVec, sled::IVec)) -> Result<AuditEntry> {
    let id = DbKeys::record_id(&key)?;
    let record = postcard::from_bytes(&val)?;
    Ok(AuditEntry { id, record })
}

impl AuditSink for SledAuditLog {
    async fn append(&self, record: &AuditRecord) -> Result<u64> {
        let log = self.clone();
        let record = record.clone();
        let id = tokio::task::spawn_blocking(move || log.append_blocking(&record)).await??;
        tracing::trace!(id, "audit record flushed");
        Ok(id)
    }
}
