//! Error types for Hamlink FEC

use thiserror::Error;

/// FEC error types
#[derive(Error, Debug)]
pub enum FecError {
    #[error("uncorrectable block: {msg}")]
    Uncorrectable { msg: String },
}

/// Result type for Hamlink FEC operations
pub type Result<T> = std::result::Result<T, FecError>;
