use sha2::{Digest, Sha256};

/// One-shot SHA-256 over a complete artifact.
pub fn sha256(data: &[u8]) -> [u8; 32] { Sha256::digest(data).into() }
