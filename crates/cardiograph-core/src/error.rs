use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Ingest error: {0}")]
    Ingest(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Quantum simulation error: {0}")]
    Quantum(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, CardioError>;
