//! Payload fragmentation and reassembly.

use crate::address::Address;
use crate::frame::{build_frame, Ax25Frame, FrameKind, LinkConfig, MAX_PAYLOAD};
use crate::{LinkError, Result};

/// Split a payload into sequenced AX.25 frames.
///
/// A payload that fits in one chunk becomes a single `DataHeader` frame;
/// larger payloads are cut into `DataFirst` / `Data` / `DataEnd` chunks
/// of exactly 256 bytes, with only the final frame allowed to run short.
pub fn packetize(config: &LinkConfig, payload: &[u8]) -> Result<Vec<Vec<u8>>> {
    let total = payload.len().div_ceil(MAX_PAYLOAD);
    if total > u16::MAX as usize {
        return Err(LinkError::PayloadTooLarge {
            len: payload.len(),
            max: MAX_PAYLOAD * u16::MAX as usize,
        });
    }

    let mut frames = Vec::with_capacity(total);
    for (index, chunk) in payload.chunks(MAX_PAYLOAD).enumerate() {
        let kind = if total == 1 {
            FrameKind::DataHeader
        } else if index == 0 {
            FrameKind::DataFirst
        } else if index == total - 1 {
            FrameKind::DataEnd
        } else {
            FrameKind::Data
        };
        frames.push(build_frame(
            config,
            kind,
            index as u16,
            total as u16,
            chunk,
        )?);
    }
    Ok(frames)
}

#[derive(Debug)]
struct Transfer {
    source: Address,
    dest: Address,
    total: u16,
    next: u16,
    buffer: Vec<u8>,
}

/// Rebuilds a fragmented payload from parsed frames.
///
/// Fragments must arrive in sequence order and agree on the link
/// endpoints and fragment count announced by the first fragment; any
/// violation discards the transfer in progress. Beacon, message, and
/// single-fragment frames pass straight through.
#[derive(Debug, Default)]
pub struct Reassembler {
    state: Option<Transfer>,
}

impl Reassembler {
    pub fn new() -> Self {
        Self { state: None }
    }

    /// True while a multi-fragment transfer is incomplete.
    pub fn in_progress(&self) -> bool {
        self.state.is_some()
    }

    /// Feed one parsed frame; returns the completed payload once the
    /// final fragment arrives.
    pub fn push(&mut self, frame: &Ax25Frame) -> Result<Option<Vec<u8>>> {
        let header = match frame.fragment {
            Some(header) => header,
            None => return Ok(Some(frame.payload.clone())),
        };

        match header.kind {
            FrameKind::Beacon | FrameKind::DataHeader | FrameKind::Message => {
                if header.total != 1 || header.sequence != 0 {
                    return Err(LinkError::FragmentSequence {
                        expected: 0,
                        got: header.sequence,
                    });
                }
                Ok(Some(frame.payload.clone()))
            }
            FrameKind::DataFirst => {
                if self.state.take().is_some() {
                    return Err(LinkError::FragmentMismatch {
                        msg: "new transfer started while one was in progress".to_string(),
                    });
                }
                if header.sequence != 0 || header.total < 2 {
                    return Err(LinkError::FragmentSequence {
                        expected: 0,
                        got: header.sequence,
                    });
                }
                self.state = Some(Transfer {
                    source: frame.source.clone(),
                    dest: frame.dest.clone(),
                    total: header.total,
                    next: 1,
                    buffer: frame.payload.clone(),
                });
                Ok(None)
            }
            FrameKind::Data | FrameKind::DataEnd => {
                let Some(mut transfer) = self.state.take() else {
                    return Err(LinkError::FragmentSequence {
                        expected: 0,
                        got: header.sequence,
                    });
                };
                if frame.source != transfer.source || frame.dest != transfer.dest {
                    return Err(LinkError::FragmentMismatch {
                        msg: format!("{}>{}", frame.source, frame.dest),
                    });
                }
                if header.total != transfer.total || header.sequence != transfer.next {
                    return Err(LinkError::FragmentSequence {
                        expected: transfer.next,
                        got: header.sequence,
                    });
                }

                transfer.buffer.extend_from_slice(&frame.payload);
                transfer.next += 1;

                if header.kind == FrameKind::DataEnd {
                    if transfer.next != transfer.total {
                        return Err(LinkError::FragmentSequence {
                            expected: transfer.total - 1,
                            got: header.sequence,
                        });
                    }
                    return Ok(Some(transfer.buffer));
                }
                self.state = Some(transfer);
                Ok(None)
            }
        }
    }
}
