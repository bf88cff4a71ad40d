use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage quota exceeded")]
    QuotaExceeded,
}

pub type Result<T> = std::result::Result<T, PersistError>;
