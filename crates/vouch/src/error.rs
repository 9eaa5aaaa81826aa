use serde::{Deserialize, Serialize};
use thiserror::Error;
use vouch_audit::AuditError;
use vouch_store::ResolveError;

/// Failure of a single verification request. None are retried internally.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("artifact store root not configured")]
    ConfigurationMissing,

    #[error("artifact lookup failed: {0}")]
    ArtifactNotFound(#[source] ResolveError),

    #[error("audit write failed: {0}")]
    AuditWriteFailed(#[source] AuditError),

    #[error("response encoding failed: {0}")]
    SerializationFailed(#[source] serde_json::Error),

    #[error("request cancelled")]
    Cancelled,
}

impl VerifyError {
    /// A malformed key is the caller's fault; every other resolver failure
    /// reads as "not found" from the outside.
    pub fn from_resolve(err: ResolveError) -> Self {
        match err {
            ResolveError::InvalidKey { .. } => Self::InvalidRequest(err.to_string()),
            other => Self::ArtifactNotFound(other),
        }
    }

    /// HTTP-style status surfaced to the caller.
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::ConfigurationMissing => 500,
            Self::ArtifactNotFound(_) => 404,
            Self::AuditWriteFailed(_) => 500,
            Self::SerializationFailed(_) => 500,
            Self::Cancelled => 408,
        }
    }

    /// Message surfaced to the caller. Internal detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "Invalid request payload",
            Self::ConfigurationMissing => "FILE_BASE_PATH environment variable is not set",
            Self::ArtifactNotFound(_) => "File not found",
            Self::AuditWriteFailed(_) => "Failed to save to database",
            Self::SerializationFailed(_) => "Failed to encode response",
            Self::Cancelled => "Request cancelled",
        }
    }
}

pub type Result<T> = std::result::Result<T, VerifyError>;

/// Error signal returned to an RPC caller: a status code and a message.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} (status {code})")]
pub struct RpcError {
    pub code:    u16,
    pub message: String,
}

impl RpcError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found_rpc() -> Self { Self::new(404, "rpc not found") }
}

impl From<VerifyError> for RpcError {
    fn from(err: VerifyError) -> Self { Self::new(err.status(), err.public_message()) }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("rpc {0:?} is already registered")]
    Duplicate(String),
    #[error("rpc name must not be empty")]
    EmptyName,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    FigmentError(#[from] figment::Error),
}
