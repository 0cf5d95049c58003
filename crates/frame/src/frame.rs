//! AX.25 frame construction and parsing.
//!
//! Wire layout of a frame:
//!
//! ```text
//! | FLAG | dest (7) | source (7) | control | PID |
//! | fragment header (5, unless Message) | payload (0..=256) |
//! | FCS (2, little-endian) | FLAG |
//! ```
//!
//! The FCS covers every byte between the flags, exclusive of both.

use serde::{Deserialize, Serialize};

use crate::address::{Address, ADDRESS_LEN};
use crate::crc::crc_ccitt;
use crate::{LinkError, Result};

/// Frame delimiter flag.
pub const FLAG: u8 = 0x7E;
/// Control byte: unnumbered information.
pub const CONTROL_UI: u8 = 0x03;
/// Protocol identifier: no layer-3 protocol.
pub const PID_NO_L3: u8 = 0xF0;
/// Largest payload a single frame carries.
pub const MAX_PAYLOAD: usize = 256;
/// Wire size of the fragment header.
pub const FRAGMENT_HEADER_LEN: usize = 5;

/// Smallest parseable frame: flags, both addresses, control, PID, FCS.
const MIN_FRAME_LEN: usize = 2 * ADDRESS_LEN + 6;

/// Frame role within a (possibly fragmented) transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FrameKind {
    /// Periodic identification broadcast; always a single frame.
    Beacon = 0,
    /// Payload that fits in a single fragment.
    DataHeader = 1,
    /// First fragment of a multi-fragment payload.
    DataFirst = 2,
    /// Interior fragment.
    Data = 3,
    /// Final fragment.
    DataEnd = 4,
    /// Single frame carrying no fragment header.
    Message = 5,
}

impl FrameKind {
    pub fn from_wire(value: u8) -> Result<Self> {
        Ok(match value {
            0 => FrameKind::Beacon,
            1 => FrameKind::DataHeader,
            2 => FrameKind::DataFirst,
            3 => FrameKind::Data,
            4 => FrameKind::DataEnd,
            5 => FrameKind::Message,
            other => {
                return Err(LinkError::InvalidFrame {
                    msg: format!("unknown frame kind {other:#04x}"),
                })
            }
        })
    }

    /// Message frames suppress the fragment header.
    pub fn has_fragment_header(self) -> bool {
        self != FrameKind::Message
    }
}

/// Five-byte fragment header: kind, zero-based sequence, fragment count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentHeader {
    pub kind: FrameKind,
    pub sequence: u16,
    pub total: u16,
}

impl FragmentHeader {
    pub fn to_bytes(self) -> [u8; FRAGMENT_HEADER_LEN] {
        let mut bytes = [0u8; FRAGMENT_HEADER_LEN];
        bytes[0] = self.kind as u8;
        bytes[1..3].copy_from_slice(&self.sequence.to_be_bytes());
        bytes[3..5].copy_from_slice(&self.total.to_be_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < FRAGMENT_HEADER_LEN {
            return Err(LinkError::InvalidFrame {
                msg: format!("fragment header too short: {} bytes", bytes.len()),
            });
        }
        Ok(Self {
            kind: FrameKind::from_wire(bytes[0])?,
            sequence: u16::from_be_bytes([bytes[1], bytes[2]]),
            total: u16::from_be_bytes([bytes[3], bytes[4]]),
        })
    }
}

/// Immutable link endpoints consumed by the frame builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    pub source_call: String,
    pub source_ssid: u8,
    pub dest_call: String,
    pub dest_ssid: u8,
}

impl LinkConfig {
    pub fn new(source_call: &str, source_ssid: u8, dest_call: &str, dest_ssid: u8) -> Self {
        Self {
            source_call: source_call.to_string(),
            source_ssid,
            dest_call: dest_call.to_string(),
            dest_ssid,
        }
    }
}

/// Build one AX.25 UI frame. The destination address is written first
/// with the end-of-address flag clear; the source address follows with
/// the flag set. Returns the complete flag-delimited wire frame.
pub fn build_frame(
    config: &LinkConfig,
    kind: FrameKind,
    sequence: u16,
    total: u16,
    payload: &[u8],
) -> Result<Vec<u8>> {
    if payload.len() > MAX_PAYLOAD {
        return Err(LinkError::PayloadTooLarge {
            len: payload.len(),
            max: MAX_PAYLOAD,
        });
    }
    let dest = Address::new(&config.dest_call, config.dest_ssid)?;
    let source = Address::new(&config.source_call, config.source_ssid)?;

    let mut frame = Vec::with_capacity(MIN_FRAME_LEN + FRAGMENT_HEADER_LEN + payload.len());
    frame.push(FLAG);
    frame.extend_from_slice(&dest.encode(false));
    frame.extend_from_slice(&source.encode(true));
    frame.push(CONTROL_UI);
    frame.push(PID_NO_L3);
    if kind.has_fragment_header() {
        let header = FragmentHeader {
            kind,
            sequence,
            total,
        };
        frame.extend_from_slice(&header.to_bytes());
    }
    frame.extend_from_slice(payload);

    let fcs = crc_ccitt(&frame[1..]);
    frame.extend_from_slice(&fcs.to_le_bytes());
    frame.push(FLAG);
    Ok(frame)
}

/// Single-frame broadcast; carries a fragment header marking one of one.
pub fn build_beacon(config: &LinkConfig, payload: &[u8]) -> Result<Vec<u8>> {
    build_frame(config, FrameKind::Beacon, 0, 1, payload)
}

/// Single frame without a fragment header.
pub fn build_message(config: &LinkConfig, payload: &[u8]) -> Result<Vec<u8>> {
    build_frame(config, FrameKind::Message, 0, 1, payload)
}

/// A parsed AX.25 frame.
#[derive(Debug, Clone)]
pub struct Ax25Frame {
    pub dest: Address,
    pub source: Address,
    pub control: u8,
    pub pid: u8,
    /// Absent on message frames.
    pub fragment: Option<FragmentHeader>,
    pub payload: Vec<u8>,
}

impl Ax25Frame {
    /// Parse a flag-delimited frame and verify its FCS.
    ///
    /// A first payload byte that is a valid non-message frame kind marks
    /// a fragment header; otherwise the frame is taken as a message
    /// frame (header suppressed).
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MIN_FRAME_LEN {
            return Err(LinkError::InvalidFrame {
                msg: format!("frame too short: {} bytes", bytes.len()),
            });
        }
        if bytes[0] != FLAG || bytes[bytes.len() - 1] != FLAG {
            return Err(LinkError::InvalidFrame {
                msg: "missing frame delimiter".to_string(),
            });
        }

        let body = &bytes[1..bytes.len() - 3];
        let fcs = &bytes[bytes.len() - 3..bytes.len() - 1];
        let expected = u16::from_le_bytes([fcs[0], fcs[1]]);
        let actual = crc_ccitt(body);
        if expected != actual {
            return Err(LinkError::FcsMismatch { expected, actual });
        }

        let (dest, dest_last) = Address::parse(&body[..ADDRESS_LEN])?;
        let (source, source_last) = Address::parse(&body[ADDRESS_LEN..2 * ADDRESS_LEN])?;
        if dest_last || !source_last {
            return Err(LinkError::InvalidFrame {
                msg: "bad end-of-address flags".to_string(),
            });
        }

        let control = body[2 * ADDRESS_LEN];
        let pid = body[2 * ADDRESS_LEN + 1];
        let rest = &body[2 * ADDRESS_LEN + 2..];

        let has_header = rest.len() >= FRAGMENT_HEADER_LEN
            && matches!(FrameKind::from_wire(rest[0]), Ok(kind) if kind.has_fragment_header());
        let (fragment, payload) = if has_header {
            let header = FragmentHeader::from_bytes(&rest[..FRAGMENT_HEADER_LEN])?;
            (Some(header), rest[FRAGMENT_HEADER_LEN..].to_vec())
        } else {
            (None, rest.to_vec())
        };

        Ok(Ax25Frame {
            dest,
            source,
            control,
            pid,
            fragment,
            payload,
        })
    }
}
