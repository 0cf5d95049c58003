//! FX.25 outer framing: correlation tag plus RS(255,223) codeword.
//!
//! The correlation tag lets a receiver locate the codeword in a noisy
//! bit-stream without relying on HDLC flags. The AX.25 frame occupies
//! the front of the 223-byte data region, zero-padded, with 32 parity
//! symbols behind it.

use hamlink_fec::rs::{RsCodec, BLOCK_LEN, DATA_LEN};

use crate::{LinkError, Result};

/// Correlation tag announcing an RS(255,223) codeword.
pub const CORRELATION_TAG: [u8; 8] = [0xCC, 0x8F, 0x8A, 0xE4, 0x85, 0xE2, 0x98, 0x01];

/// Wire length of one FX.25 frame: tag plus codeword.
pub const FX25_FRAME_LEN: usize = CORRELATION_TAG.len() + BLOCK_LEN;

/// Result of unwrapping a received FX.25 frame.
#[derive(Debug, Clone)]
pub struct Unwrapped {
    /// The corrected 223-byte data region: the AX.25 frame followed by
    /// its zero padding, which the caller trims.
    pub data: Vec<u8>,
    /// Symbol errors corrected by the RS decoder.
    pub corrected: usize,
}

/// FX.25 wrapper over a Reed-Solomon codec context.
#[derive(Debug, Clone, Default)]
pub struct Fx25Codec {
    rs: RsCodec,
}

impl Fx25Codec {
    pub fn new() -> Self {
        Self { rs: RsCodec::new() }
    }

    /// Wrap one AX.25 frame: zero-pad to 223 bytes, append 32 parity
    /// symbols, prepend the correlation tag. The result is always 263
    /// bytes; frames longer than 223 bytes are rejected.
    pub fn wrap(&self, ax25_frame: &[u8]) -> Result<Vec<u8>> {
        if ax25_frame.len() > DATA_LEN {
            return Err(LinkError::PayloadTooLarge {
                len: ax25_frame.len(),
                max: DATA_LEN,
            });
        }

        let mut block = [0u8; DATA_LEN];
        block[..ax25_frame.len()].copy_from_slice(ax25_frame);
        let codeword = self.rs.encode_block(&block);

        let mut frame = Vec::with_capacity(FX25_FRAME_LEN);
        frame.extend_from_slice(&CORRELATION_TAG);
        frame.extend_from_slice(&codeword);
        Ok(frame)
    }

    /// Unwrap a received FX.25 frame: check the correlation tag, correct
    /// the codeword, and return the data region.
    pub fn unwrap(&self, frame: &[u8]) -> Result<Unwrapped> {
        if frame.len() != FX25_FRAME_LEN {
            return Err(LinkError::InvalidFrame {
                msg: format!(
                    "FX.25 frame must be {FX25_FRAME_LEN} bytes, got {}",
                    frame.len()
                ),
            });
        }
        if frame[..CORRELATION_TAG.len()] != CORRELATION_TAG {
            return Err(LinkError::TagMismatch);
        }

        let mut codeword = [0u8; BLOCK_LEN];
        codeword.copy_from_slice(&frame[CORRELATION_TAG.len()..]);
        let decoded = self.rs.decode_block(&codeword)?;

        Ok(Unwrapped {
            data: decoded.block[..DATA_LEN].to_vec(),
            corrected: decoded.corrected,
        })
    }
}
