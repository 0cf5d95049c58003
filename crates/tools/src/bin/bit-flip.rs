//! Bit-flip fault injector for exercising the decoder.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Flip the low bit of one byte in a file
#[derive(Debug, Parser)]
#[command(name = "bit-flip")]
#[command(about = "Flip the low bit of one byte in a file")]
struct Cli {
    /// Input file
    input: PathBuf,

    /// Output file
    output: PathBuf,

    /// Byte offset of the bit to flip
    offset: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut data = std::fs::read(&cli.input)
        .with_context(|| format!("Failed to read input file: {:?}", cli.input))?;
    anyhow::ensure!(
        cli.offset < data.len(),
        "offset {} beyond end of file ({} bytes)",
        cli.offset,
        data.len()
    );

    data[cli.offset] ^= 0x01;
    std::fs::write(&cli.output, &data)
        .with_context(|| format!("Failed to write output file: {:?}", cli.output))?;

    println!("Flipped bit 0 of byte {} into {:?}", cli.offset, cli.output);
    Ok(())
}
