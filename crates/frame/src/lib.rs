//! Hamlink Frame - AX.25 and FX.25 framing
//!
//! This crate builds and parses AX.25 link-layer frames, fragments large
//! payloads into sequenced frames (and reassembles them), and wraps
//! frames in FX.25 outer framing for forward error correction.

pub mod address;
pub mod crc;
pub mod frame;
pub mod packetize;
pub mod fx25;
pub mod error;

pub use error::{LinkError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        address::Address,
        frame::{
            build_beacon, build_frame, build_message, Ax25Frame, FragmentHeader, FrameKind,
            LinkConfig,
        },
        packetize::{packetize, Reassembler},
        fx25::{Fx25Codec, Unwrapped, CORRELATION_TAG, FX25_FRAME_LEN},
        error::{LinkError, Result},
    };
}
