//! Line-oriented hex dump interchange between pipeline stages.
//!
//! Packets are written as a `Packet {n} ({len} bytes):` header followed
//! by rows of sixteen uppercase hex bytes and a blank line. The parser
//! is deliberately lax: boundaries are lines containing both "Packet"
//! and "bytes", tokens that are not hex bytes are skipped, and a blank
//! line or end of input closes the packet.

use std::io::{self, BufRead, Write};

const BYTES_PER_LINE: usize = 16;

fn hex_row(bytes: &[u8]) -> String {
    let cells: Vec<String> = bytes.iter().map(|b| format!("{b:02X}")).collect();
    cells.join(" ")
}

/// Write one packet in the interchange format.
pub fn write_packet<W: Write>(out: &mut W, index: usize, bytes: &[u8]) -> io::Result<()> {
    writeln!(out, "Packet {} ({} bytes):", index, bytes.len())?;
    for chunk in bytes.chunks(BYTES_PER_LINE) {
        writeln!(out, "{}", hex_row(chunk))?;
    }
    writeln!(out)
}

/// Write one FX.25 frame with labeled tag and codeword sections.
pub fn write_fx25_packet<W: Write>(out: &mut W, index: usize, frame: &[u8]) -> io::Result<()> {
    writeln!(out, "FX.25 Packet {} ({} bytes):", index, frame.len())?;
    let split = frame.len().min(8);
    writeln!(out, "Correlation Tag: {}", hex_row(&frame[..split]))?;
    writeln!(out, "RS Codeword:")?;
    for chunk in frame[split..].chunks(BYTES_PER_LINE) {
        writeln!(out, "{}", hex_row(chunk))?;
    }
    writeln!(out)
}

/// Parse all packets from a hex dump.
pub fn parse_packets<R: BufRead>(input: R) -> io::Result<Vec<Vec<u8>>> {
    let mut packets = Vec::new();
    let mut current: Vec<u8> = Vec::new();
    let mut in_packet = false;

    for line in input.lines() {
        let line = line?;

        if line.contains("Packet") && line.contains("bytes") {
            if in_packet && !current.is_empty() {
                packets.push(std::mem::take(&mut current));
            }
            current.clear();
            in_packet = true;
            continue;
        }
        if !in_packet {
            continue;
        }
        if line.trim().is_empty() {
            if !current.is_empty() {
                packets.push(std::mem::take(&mut current));
            }
            in_packet = false;
            continue;
        }
        for token in line.split_whitespace() {
            if token.len() <= 2 {
                if let Ok(byte) = u8::from_str_radix(token, 16) {
                    current.push(byte);
                }
            }
        }
    }
    if in_packet && !current.is_empty() {
        packets.push(current);
    }
    Ok(packets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    #[test]
    fn test_writer_format() {
        let mut out = Vec::new();
        write_packet(&mut out, 0, &[0x7E, 0xA5, 0x00]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Packet 0 (3 bytes):\n7E A5 00\n\n");
    }

    #[test]
    fn test_writer_wraps_lines_at_sixteen() {
        let bytes: Vec<u8> = (0..40).collect();
        let mut out = Vec::new();
        write_packet(&mut out, 1, &bytes).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4); // header + 16 + 16 + 8
        assert_eq!(lines[1].split(' ').count(), 16);
        assert_eq!(lines[3].split(' ').count(), 8);
    }

    #[test]
    fn test_roundtrip() {
        let packets: Vec<Vec<u8>> = vec![
            (0..100).collect(),
            vec![0x7E, 0x03, 0xF0],
            (0..=255).collect(),
        ];
        let mut out = Vec::new();
        for (i, p) in packets.iter().enumerate() {
            write_packet(&mut out, i, p).unwrap();
        }
        let parsed = parse_packets(BufReader::new(&out[..])).unwrap();
        assert_eq!(parsed, packets);
    }

    #[test]
    fn test_parser_tolerates_odd_whitespace() {
        let input = "Packet 0 (4 bytes):\n  7E\t01   02\n7f\n\n";
        let parsed = parse_packets(BufReader::new(input.as_bytes())).unwrap();
        assert_eq!(parsed, vec![vec![0x7E, 0x01, 0x02, 0x7F]]);
    }

    #[test]
    fn test_parser_skips_junk_tokens() {
        let input = "Packet 0 (2 bytes):\nzz 7E GG 01 toolong\n\n";
        let parsed = parse_packets(BufReader::new(input.as_bytes())).unwrap();
        assert_eq!(parsed, vec![vec![0x7E, 0x01]]);
    }

    #[test]
    fn test_parser_flushes_at_eof() {
        let input = "Packet 0 (2 bytes):\nAB CD";
        let parsed = parse_packets(BufReader::new(input.as_bytes())).unwrap();
        assert_eq!(parsed, vec![vec![0xAB, 0xCD]]);
    }

    #[test]
    fn test_parser_handles_back_to_back_headers() {
        let input = "Packet 0 (1 bytes):\n11\nPacket 1 (1 bytes):\n22\n\n";
        let parsed = parse_packets(BufReader::new(input.as_bytes())).unwrap();
        assert_eq!(parsed, vec![vec![0x11], vec![0x22]]);
    }

    #[test]
    fn test_parser_ignores_leading_noise() {
        let input = "generated by hamlink\n\nPacket 0 (1 bytes):\n42\n\n";
        let parsed = parse_packets(BufReader::new(input.as_bytes())).unwrap();
        assert_eq!(parsed, vec![vec![0x42]]);
    }

    #[test]
    fn test_fx25_writer_sections() {
        let frame: Vec<u8> = (0..30).collect();
        let mut out = Vec::new();
        write_fx25_packet(&mut out, 2, &frame).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("FX.25 Packet 2 (30 bytes):\n"));
        assert!(text.contains("Correlation Tag: 00 01 02 03 04 05 06 07\n"));
        assert!(text.contains("RS Codeword:\n"));
    }
}
