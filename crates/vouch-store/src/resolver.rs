use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::ArtifactKey;
use crate::error::Result;

/// Read-only lookup of artifact bytes by key.
///
/// Implementations own their own concurrency control; callers may resolve
/// any number of keys concurrently through a shared reference.
///
/// # Implementations
///
/// - [`FsArtifactStore`](crate::FsArtifactStore): files under a root directory
/// - [`MemoryArtifactStore`](crate::MemoryArtifactStore): in-process map
/// - [`CachedResolver`](crate::CachedResolver): read-through cache over another resolver
pub trait ArtifactResolver: Send + Sync {
    /// Return the exact bytes stored at `key`.
    ///
    /// # Errors
    ///
    /// [`ResolveError::NotFound`](crate::ResolveError::NotFound) when nothing is
    /// stored at `key`, [`ResolveError::Unavailable`](crate::ResolveError::Unavailable)
    /// for any other store failure.
    fn resolve(&self, key: &ArtifactKey) -> impl Future<Output = Result<Bytes>> + Send;
}

impl<R: ArtifactResolver> ArtifactResolver for Arc<R> {
    fn resolve(&self, key: &ArtifactKey) -> impl Future<Output = Result<Bytes>> + Send {
        (**self).resolve(key)
    }
}
