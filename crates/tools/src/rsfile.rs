//! Binary Reed-Solomon file pipelines.
//!
//! Encoded files are plain concatenations of 255-byte codewords; the
//! decoder recovers 223 bytes per block and trims the zero padding from
//! the final block.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

use hamlink_fec::rs::{RsCodec, BLOCK_LEN, DATA_LEN};

/// Per-file decode counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Blocks read from the input.
    pub processed: usize,
    /// Blocks that needed at least one correction.
    pub corrected_blocks: usize,
    /// Total symbols corrected across the file.
    pub corrected_symbols: usize,
    /// Blocks passed through uncorrected.
    pub failed: usize,
}

/// Encode a file into concatenated RS codewords; the final short block
/// is zero-padded to the full data length. Returns the block count.
pub fn encode_file(codec: &RsCodec, input: &Path, output: &Path) -> Result<usize> {
    let data = std::fs::read(input)
        .with_context(|| format!("Failed to read input file: {:?}", input))?;
    anyhow::ensure!(!data.is_empty(), "input file is empty: {:?}", input);

    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {:?}", output))?;
    let mut out = BufWriter::new(file);

    let mut blocks = 0usize;
    for chunk in data.chunks(DATA_LEN) {
        let mut block = [0u8; DATA_LEN];
        block[..chunk.len()].copy_from_slice(chunk);
        out.write_all(&codec.encode_block(&block))?;
        blocks += 1;
    }
    out.flush()?;

    info!(blocks, bytes = data.len(), "encoded file");
    Ok(blocks)
}

/// Decode a file of concatenated RS codewords.
///
/// Uncorrectable blocks are passed through unchanged and counted; the
/// stream is always processed to completion.
pub fn decode_file(codec: &RsCodec, input: &Path, output: &Path) -> Result<DecodeStats> {
    let data = std::fs::read(input)
        .with_context(|| format!("Failed to read input file: {:?}", input))?;
    anyhow::ensure!(!data.is_empty(), "input file is empty: {:?}", input);

    let total_blocks = data.len().div_ceil(BLOCK_LEN);
    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {:?}", output))?;
    let mut out = BufWriter::new(file);

    let mut stats = DecodeStats::default();
    for (index, chunk) in data.chunks(BLOCK_LEN).enumerate() {
        let mut received = [0u8; BLOCK_LEN];
        received[..chunk.len()].copy_from_slice(chunk);

        let (block, corrected) = match codec.decode_block(&received) {
            Ok(decoded) => (decoded.block, decoded.corrected),
            Err(err) => {
                warn!(block = index, %err, "uncorrectable block, passing through");
                stats.failed += 1;
                (received, 0)
            }
        };
        if corrected > 0 {
            stats.corrected_blocks += 1;
            stats.corrected_symbols += corrected;
        }
        stats.processed += 1;

        // The final block sheds the zero padding added by the encoder.
        let mut write_len = DATA_LEN;
        if index == total_blocks - 1 {
            while write_len > 0 && block[write_len - 1] == 0 {
                write_len -= 1;
            }
        }
        out.write_all(&block[..write_len])?;
    }
    out.flush()?;

    info!(
        processed = stats.processed,
        corrected = stats.corrected_blocks,
        failed = stats.failed,
        "decoding complete"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_payload(len: usize) -> Vec<u8> {
        // Ends in a nonzero byte so padding removal is exact.
        (0..len).map(|i| (i % 250 + 1) as u8).collect()
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let dir = tempdir().unwrap();
        let plain = dir.path().join("input.bin");
        let encoded = dir.path().join("encoded.bin");
        let decoded = dir.path().join("decoded.bin");

        let payload = sample_payload(500);
        std::fs::write(&plain, &payload).unwrap();

        let codec = RsCodec::new();
        let blocks = encode_file(&codec, &plain, &encoded).unwrap();
        assert_eq!(blocks, 3);
        assert_eq!(
            std::fs::read(&encoded).unwrap().len(),
            blocks * BLOCK_LEN
        );

        let stats = decode_file(&codec, &encoded, &decoded).unwrap();
        assert_eq!(stats.processed, 3);
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.corrected_blocks, 0);
        assert_eq!(std::fs::read(&decoded).unwrap(), payload);
    }

    #[test]
    fn test_decode_corrects_corruption() {
        let dir = tempdir().unwrap();
        let plain = dir.path().join("input.bin");
        let encoded = dir.path().join("encoded.bin");
        let decoded = dir.path().join("decoded.bin");

        let payload = sample_payload(300);
        std::fs::write(&plain, &payload).unwrap();

        let codec = RsCodec::new();
        encode_file(&codec, &plain, &encoded).unwrap();

        // Flip a bit in each block, the way the fault injector does.
        let mut corrupted = std::fs::read(&encoded).unwrap();
        corrupted[100] ^= 0x01;
        corrupted[BLOCK_LEN + 7] ^= 0x01;
        std::fs::write(&encoded, &corrupted).unwrap();

        let stats = decode_file(&codec, &encoded, &decoded).unwrap();
        assert_eq!(stats.processed, 2);
        assert_eq!(stats.corrected_blocks, 2);
        assert_eq!(stats.corrected_symbols, 2);
        assert_eq!(stats.failed, 0);
        assert_eq!(std::fs::read(&decoded).unwrap(), payload);
    }

    #[test]
    fn test_uncorrectable_block_passes_through() {
        let dir = tempdir().unwrap();
        let plain = dir.path().join("input.bin");
        let encoded = dir.path().join("encoded.bin");
        let decoded = dir.path().join("decoded.bin");

        let payload = sample_payload(400);
        std::fs::write(&plain, &payload).unwrap();

        let codec = RsCodec::new();
        encode_file(&codec, &plain, &encoded).unwrap();

        // Destroy 17 symbols of the first block; the second stays clean.
        let mut corrupted = std::fs::read(&encoded).unwrap();
        for i in 0..17 {
            corrupted[i * 11] ^= 0xC3;
        }
        std::fs::write(&encoded, &corrupted).unwrap();

        let stats = decode_file(&codec, &encoded, &decoded).unwrap();
        assert_eq!(stats.processed, 2);
        assert_eq!(stats.failed, 1);

        // The second block still decodes to the original payload bytes.
        let result = std::fs::read(&decoded).unwrap();
        assert_eq!(&result[DATA_LEN..], &payload[DATA_LEN..]);
    }

    #[test]
    fn test_empty_input_rejected() {
        let dir = tempdir().unwrap();
        let plain = dir.path().join("empty.bin");
        let out = dir.path().join("out.bin");
        std::fs::write(&plain, b"").unwrap();

        let codec = RsCodec::new();
        assert!(encode_file(&codec, &plain, &out).is_err());
        assert!(decode_file(&codec, &plain, &out).is_err());
    }
}
