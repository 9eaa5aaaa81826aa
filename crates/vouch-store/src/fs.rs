use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::error::{ResolveError, Result};
use crate::{ArtifactKey, ArtifactResolver};

const DEFAULT_EXTENSION: &str = "json";

/// Artifacts stored as files: `<root>/<type>/<version>.<extension>`.
#[derive(Clone, Debug)]
pub struct FsArtifactStore {
    root:      PathBuf,
    extension: String,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root:      root.into(),
            extension: DEFAULT_EXTENSION.to_owned(),
        }
    }

    /// Use a different file extension. An empty extension stores the version
    /// as a bare file name.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn root(&self) -> &Path { &self.root }

    pub fn path_of(&self, key: &ArtifactKey) -> PathBuf {
        let file_name = if self.extension.is_empty() {
            key.version().to_owned()
        } else {
            format!("{}.{}", key.version(), self.extension)
        };
        self.root.join(key.kind()).join(file_name)
    }
}

impl ArtifactResolver for FsArtifactStore {
    async fn resolve(&self, key: &ArtifactKey) -> Result<Bytes> {
        let path = self.path_of(key);
        tracing::trace!(path = %path.display(), "reading artifact");
        let content = tokio::fs::read(&path)
            .await
            .map_err(|e| ResolveError::from_io(key, e))?;
        Ok(Bytes::from(content))
    }
}
