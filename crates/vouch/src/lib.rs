//! Content-integrity verification endpoint.
//!
//! Given a `(type, version)` identifier the [`Verifier`] resolves the stored
//! artifact, computes its SHA-256 digest and returns it. A caller that pins a
//! digest only sees the content when the pin matches. Every successful
//! request is journaled before the response leaves the verifier.
//!
//! # Architecture
//!
//! - [`vouch_store`] - artifact resolution, the only read path
//! - [`vouch_verify`] - digest primitives
//! - [`vouch_audit`] - append-only journal
//! - [`rpc`] - JSON endpoint and named registry on top of the verifier
//!
//! # Example
//!
//! ```
//! use tokio_util::sync::CancellationToken;
//! use vouch::{VerificationRequest, Verifier};
//! use vouch_audit::MemoryAuditLog;
//! use vouch_store::{ArtifactKey, MemoryArtifactStore};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let store = MemoryArtifactStore::new()
//!     .with(ArtifactKey::new("core", "1.0.0").unwrap(), "file content");
//! let verifier = Verifier::new(store, MemoryAuditLog::new());
//!
//! let request = VerificationRequest::new().expected_hash("invalidhash");
//! let response = verifier.verify(request, &CancellationToken::new()).await.unwrap();
//!
//! assert_eq!(response.hash, "e0ac3601005dfa1864f5392aabaf7d898b1b5bab854f1acb4491bcd806b76b0c");
//! assert_eq!(response.content, None);
//! # });
//! ```

pub mod config;
pub mod logging;
pub mod rpc;

mod error;
mod payload;
mod verifier;

pub use config::Config;
pub use error::{ConfigError, RegistryError, Result, RpcError, VerifyError};
pub use payload::{DEFAULT_TYPE, DEFAULT_VERSION, VerificationRequest, VerificationResponse};
pub use rpc::{CHECKSUM_RPC, RpcContext, RpcRegistry, init_module, rpc_checksum};
pub use verifier::Verifier;
