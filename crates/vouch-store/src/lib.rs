//! Read-only artifact resolution keyed by `(type, version)`.
//!
//! The store never writes: artifacts are created and replaced by whoever owns
//! the backing directory. Resolution distinguishes "does not exist" from
//! "store is failing" so callers can log and retry them differently.

mod cache;
mod error;
mod fs;
mod key;
mod memory;
mod resolver;

pub use cache::CachedResolver;
pub use error::{ResolveError, Result};
pub use fs::FsArtifactStore;
pub use key::ArtifactKey;
pub use memory::MemoryArtifactStore;
pub use resolver::ArtifactResolver;
