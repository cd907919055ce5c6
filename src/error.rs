//! Error types for pronounce

use thiserror::Error;

/// Result type alias using pronounce's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the edges of the scoring core
///
/// Scoring itself is total; these cover decoding, configuration and the FFI boundary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid report: {0}")]
    InvalidReport(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
