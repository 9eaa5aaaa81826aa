//! Content digest primitives for stored artifacts.
//!
//! The canonical digest handed to callers is lowercase hex SHA-256.
//!
//! # Example
//!
//! ```
//! use vouch_verify::ContentDigest;
//!
//! let digest = ContentDigest::of(b"file content");
//! assert!(digest.matches("e0ac3601005dfa1864f5392aabaf7d898b1b5bab854f1acb4491bcd806b76b0c"));
//! assert!(!digest.matches("invalidhash"));
//! ```

pub use self::digest::ContentDigest;
pub use self::hasher::sha256;

mod digest;
mod hasher;
