use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Database Error {0}")]
    Database(#[from] sled::Error),
    #[error("Serialization Error {0}")]
    Serialization(#[from] postcard::Error),
    #[error("journal task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("corrupt journal key {0:?}")]
    CorruptKey(String),
    #[error("append rejected: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, AuditError>;
