use std::fmt;
use std::path::{Component, Path};

use crate::error::{ResolveError, Result};

/// Logical address of an artifact: `(type, version)`.
///
/// Both segments are used as single path components by file-backed stores,
/// so construction rejects anything that could address outside the store.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArtifactKey {
    kind:    String,
    version: String,
}

impl ArtifactKey {
    pub fn new(kind: impl Into<String>, version: impl Into<String>) -> Result<Self> {
        let kind = kind.into();
        let version = version.into();
        validate_segment(&kind)?;
        validate_segment(&version)?;
        Ok(Self { kind, version })
    }

    pub fn kind(&self) -> &str { &self.kind }

    pub fn version(&self) -> &str { &self.version }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.version)
    }
}

fn validate_segment(segment: &str) -> Result<()> {
    let invalid = |reason| {
        Err(ResolveError::InvalidKey {
            segment: segment.to_owned(),
            reason,
        })
    };

    if segment.is_empty() {
        return invalid("empty segment");
    }
    if segment.contains(['/', '\\', '\0']) {
        return invalid("contains a path separator");
    }

    // Rejects `.`, `..` and platform prefixes such as `C:`
    let mut components = Path::new(segment).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == segment => Ok(()),
        _ => invalid("not a plain path component"),
    }
}
