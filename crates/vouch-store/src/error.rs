use std::io;

use crate::ArtifactKey;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("invalid artifact key segment {segment:?}: {reason}")]
    InvalidKey {
        segment: String,
        reason:  &'static str,
    },

    #[error("artifact not found: {key}")]
    NotFound { key: ArtifactKey },

    #[error("artifact store unavailable for {key}: {source}")]
    Unavailable {
        key:    ArtifactKey,
        #[source]
        source: io::Error,
    },
}

impl ResolveError {
    /// Classify an I/O failure while reading `key`.
    ///
    /// A missing file, or a path component that is not a directory, means the
    /// artifact does not exist. Anything else is a store fault.
    pub fn from_io(key: &ArtifactKey, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound
            | io::ErrorKind::IsADirectory
            | io::ErrorKind::NotADirectory => Self::NotFound { key: key.clone() },
            _ => Self::Unavailable {
                key:    key.clone(),
                source: err,
            },
        }
    }

    pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound { .. }) }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
