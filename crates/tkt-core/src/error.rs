//! Error types for tkt

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}
