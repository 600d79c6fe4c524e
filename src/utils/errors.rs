use thiserror::Error;

#[derive(Error, Debug)]
pub enum StepDbError {
    #[error("Store error: {0}")]
    Store(#[from] redb::Error),

    #[error("Certificate parsing error: {0}")]
    CertParsing(String),

    #[error("No records found in bucket: {0}")]
    NoRecords(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, StepDbError>;
