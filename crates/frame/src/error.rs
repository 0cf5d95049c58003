//! Error types for Hamlink Frame

use thiserror::Error;

/// Link-layer error types
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("payload too large: {len} bytes (limit {max})")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("invalid callsign: {callsign:?}")]
    InvalidCallsign { callsign: String },

    #[error("SSID out of range: {ssid}")]
    InvalidSsid { ssid: u8 },

    #[error("invalid frame: {msg}")]
    InvalidFrame { msg: String },

    #[error("FCS mismatch: expected {expected:#06x}, computed {actual:#06x}")]
    FcsMismatch { expected: u16, actual: u16 },

    #[error("correlation tag mismatch")]
    TagMismatch,

    #[error("fragment out of sequence: expected {expected}, got {got}")]
    FragmentSequence { expected: u16, got: u16 },

    #[error("fragment does not belong to the transfer in progress: {msg}")]
    FragmentMismatch { msg: String },

    #[error("FEC error: {0}")]
    Fec(#[from] hamlink_fec::FecError),
}

/// Result type for Hamlink Frame operations
pub type Result<T> = std::result::Result<T, LinkError>;
