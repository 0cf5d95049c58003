//! AX.25 address fields: shifted-ASCII callsign plus SSID byte.

use std::fmt;

use crate::{LinkError, Result};

/// Encoded length of one address field.
pub const ADDRESS_LEN: usize = 7;
/// Maximum callsign length in characters.
pub const CALLSIGN_LEN: usize = 6;
/// Widest SSID the address byte can carry (6 bits).
pub const MAX_SSID: u8 = 63;

/// A station address: callsign of up to 6 ASCII characters and an SSID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub callsign: String,
    pub ssid: u8,
}

impl Address {
    pub fn new(callsign: &str, ssid: u8) -> Result<Self> {
        if callsign.len() > CALLSIGN_LEN || !callsign.is_ascii() {
            return Err(LinkError::InvalidCallsign {
                callsign: callsign.to_string(),
            });
        }
        if ssid > MAX_SSID {
            return Err(LinkError::InvalidSsid { ssid });
        }
        Ok(Self {
            callsign: callsign.to_string(),
            ssid,
        })
    }

    /// Encode into the 7-byte wire field. Each callsign byte is shifted
    /// left one bit (space-padded to six); the SSID byte carries the
    /// end-of-address flag in bit 0.
    pub fn encode(&self, last: bool) -> [u8; ADDRESS_LEN] {
        let mut field = [b' ' << 1; ADDRESS_LEN];
        for (slot, &b) in field.iter_mut().zip(self.callsign.as_bytes()) {
            *slot = b << 1;
        }
        field[CALLSIGN_LEN] = (self.ssid << 1) | last as u8;
        field
    }

    /// Decode a 7-byte wire field; returns the address and whether the
    /// end-of-address flag was set.
    pub fn parse(field: &[u8]) -> Result<(Self, bool)> {
        if field.len() < ADDRESS_LEN {
            return Err(LinkError::InvalidFrame {
                msg: format!("address field too short: {} bytes", field.len()),
            });
        }
        let callsign: String = field[..CALLSIGN_LEN]
            .iter()
            .map(|&b| (b >> 1) as char)
            .collect();
        let ssid = (field[CALLSIGN_LEN] >> 1) & MAX_SSID;
        let last = field[CALLSIGN_LEN] & 0x01 != 0;
        Ok((
            Self {
                callsign: callsign.trim_end().to_string(),
                ssid,
            },
            last,
        ))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ssid > 0 {
            write!(f, "{}-{}", self.callsign, self.ssid)
        } else {
            write!(f, "{}", self.callsign)
        }
    }
}
