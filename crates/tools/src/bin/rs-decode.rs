//! Hamlink Reed-Solomon file decoder.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use hamlink_fec::rs::RsCodec;
use hamlink_tools::rsfile;

/// Decode a file of Reed-Solomon (255,223) codewords
#[derive(Debug, Parser)]
#[command(name = "rs-decode")]
#[command(about = "Decode a file of Reed-Solomon (255,223) codewords")]
struct Cli {
    /// Input file of concatenated codewords
    input: PathBuf,

    /// Output file of recovered data
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    let codec = RsCodec::new();
    let stats = rsfile::decode_file(&codec, &cli.input, &cli.output)?;

    println!(
        "Decoding complete: {} blocks processed, {} corrected, {} failed",
        stats.processed, stats.corrected_blocks, stats.failed
    );
    if stats.failed > 0 {
        anyhow::bail!("{} of {} blocks were uncorrectable", stats.failed, stats.processed);
    }
    Ok(())
}
