use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use bytes::Bytes;

use crate::error::{ResolveError, Result};
use crate::{ArtifactKey, ArtifactResolver};

/// In-process artifact map.
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    artifacts: RwLock<HashMap<ArtifactKey, Bytes>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self { Self::default() }

    pub fn with(self, key: ArtifactKey, content: impl Into<Bytes>) -> Self {
        self.insert(key, content);
        self
    }

    /// Store `content` at `key`, returning what was there before.
    pub fn insert(&self, key: ArtifactKey, content: impl Into<Bytes>) -> Option<Bytes> {
        self.artifacts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, content.into())
    }

    pub fn remove(&self, key: &ArtifactKey) -> Option<Bytes> {
        self.artifacts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    fn get(&self, key: &ArtifactKey) -> Option<Bytes> {
        self.artifacts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl ArtifactResolver for MemoryArtifactStore {
    async fn resolve(&self, key: &ArtifactKey) -> Result<Bytes> {
        self.get(key)
            .ok_or_else(|| ResolveError::NotFound { key: key.clone() })
    }
}
