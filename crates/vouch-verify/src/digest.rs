use std::fmt;

use crate::hasher::sha256;

/// Lowercase hex SHA-256 digest of an artifact.
///
/// Callers pin these values, so the algorithm and the encoding are fixed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentDigest(String);

impl ContentDigest {
    pub fn of(data: &[u8]) -> Self { Self(hex::encode(sha256(data))) }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn into_string(self) -> String { self.0 }

    /// Literal comparison against a caller-supplied digest.
    ///
    /// No case folding or trimming: `"E0AC..."` does not match `"e0ac..."`.
    pub fn matches(&self, expected: &str) -> bool { self.0 == expected }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}
