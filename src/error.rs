use thiserror::Error;

/// Failures outside the wizard core: config loading, logging, terminal I/O.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid questionnaire file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid border colour: {0}")]
    InvalidColor(String),
    #[error("Invalid style: {0}")]
    InvalidStyle(String),
    #[error("Could not start logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
