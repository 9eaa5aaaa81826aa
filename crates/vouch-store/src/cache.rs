//! Read-through cache over any [`ArtifactResolver`].
//!
//! Only successful resolutions are kept; a miss or a store fault is never
//! cached, so an artifact that appears later is picked up on the next call.
//! Entries live until [`CachedResolver::invalidate`] or [`CachedResolver::clear`].
//! A resolution that started before an invalidation does not repopulate the
//! cache with the bytes it read.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use bytes::Bytes;

use crate::error::Result;
use crate::{ArtifactKey, ArtifactResolver};

pub struct CachedResolver<R> {
    inner:   R,
    entries: RwLock<Entries>,
}

#[derive(Default)]
struct Entries {
    bytes:      HashMap<ArtifactKey, Bytes>,
    /// Bumped by every invalidation.
    generation: u64,
}

impl<R> CachedResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            entries: RwLock::new(Entries::default()),
        }
    }

    pub fn inner(&self) -> &R { &self.inner }

    /// Drop the cached bytes for `key`. Returns whether an entry was present.
    pub fn invalidate(&self, key: &ArtifactKey) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.generation += 1;
        entries.bytes.remove(key).is_some()
    }

    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.generation += 1;
        entries.bytes.clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .bytes
            .len()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Cached bytes for `key`, or the generation a fresh read starts from.
    fn cached(&self, key: &ArtifactKey) -> std::result::Result<Bytes, u64> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.bytes.get(key).cloned().ok_or(entries.generation)
    }

    /// Keep `bytes` unless an invalidation happened since `generation`.
    fn store(&self, key: &ArtifactKey, bytes: Bytes, generation: u64) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.generation == generation {
            entries.bytes.insert(key.clone(), bytes);
        }
    }
}

impl<R: ArtifactResolver> ArtifactResolver for CachedResolver<R> {
    async fn resolve(&self, key: &ArtifactKey) -> Result<Bytes> {
        let generation = match self.cached(key) {
            Ok(bytes) => {
                tracing::trace!(%key, "artifact cache hit");
                return Ok(bytes);
            }
            Err(generation) => generation,
        };

        let bytes = self.inner.resolve(key).await?;
        self.store(key, bytes.clone(), generation);
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::Notify;

    use super::*;
    use crate::MemoryArtifactStore;

    fn key(version: &str) -> ArtifactKey { ArtifactKey::new("core", version).unwrap() }

    #[tokio::test]
    async fn test_serves_cached_bytes_until_invalidated() {
        let cache = CachedResolver::new(MemoryArtifactStore::new().with(key("1.0.0"), "v1"));

        assert_eq!(&cache.resolve(&key("1.0.0")).await.unwrap()[..], b"v1");

        cache.inner().insert(key("1.0.0"), "v2");
        assert_eq!(&cache.resolve(&key("1.0.0")).await.unwrap()[..], b"v1");

        assert!(cache.invalidate(&key("1.0.0")));
        assert_eq!(&cache.resolve(&key("1.0.0")).await.unwrap()[..], b"v2");
    }

    #[tokio::test]
    async fn test_misses_are_not_cached() {
        let cache = CachedResolver::new(MemoryArtifactStore::new());

        assert!(cache.resolve(&key("1.0.0")).await.unwrap_err().is_not_found());
        assert!(cache.is_empty());

        cache.inner().insert(key("1.0.0"), "late");
        assert_eq!(&cache.resolve(&key("1.0.0")).await.unwrap()[..], b"late");
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = MemoryArtifactStore::new()
            .with(key("1.0.0"), "a")
            .with(key("2.0.0"), "b");
        let cache = CachedResolver::new(store);

        cache.resolve(&key("1.0.0")).await.unwrap();
        cache.resolve(&key("2.0.0")).await.unwrap();
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.invalidate(&key("1.0.0")));
    }

    /// Parks every read until released.
    struct GatedStore {
        bytes:   &'static str,
        entered: Notify,
        release: Notify,
    }

    impl ArtifactResolver for GatedStore {
        async fn resolve(&self, _key: &ArtifactKey) -> Result<Bytes> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(Bytes::from_static(self.bytes.as_bytes()))
        }
    }

    #[tokio::test]
    async fn test_invalidate_during_read_is_not_undone() {
        let cache = CachedResolver::new(GatedStore {
            bytes:   "stale",
            entered: Notify::new(),
            release: Notify::new(),
        });

        let read_key = key("1.0.0");
        let read = cache.resolve(&read_key);
        let invalidate = async {
            cache.inner().entered.notified().await;
            cache.invalidate(&key("1.0.0"));
            cache.inner().release.notify_one();
        };
        let (bytes, ()) = tokio::join!(read, invalidate);

        assert_eq!(&bytes.unwrap()[..], b"stale");
        assert!(cache.is_empty());
    }
}
