//! Hamlink FEC - Reed-Solomon forward error correction
//!
//! This crate provides GF(2^8) arithmetic and the systematic RS(255,223)
//! encoder/decoder used by the FX.25 framing layer. Field parameters
//! follow the CCSDS recommendation: primitive polynomial 0x11D,
//! alpha = 2, first consecutive generator root alpha^0.

pub mod gf;
pub mod rs;
pub mod error;

pub use error::{FecError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        gf::GaloisField,
        rs::{Decoded, RsCodec, BLOCK_LEN, DATA_LEN, MAX_ERRORS, PARITY_LEN},
        error::{FecError, Result},
    };
}
