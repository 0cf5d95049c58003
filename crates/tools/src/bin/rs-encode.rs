//! Hamlink Reed-Solomon file encoder.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use hamlink_fec::rs::RsCodec;
use hamlink_tools::rsfile;

/// Encode a file into Reed-Solomon (255,223) codewords
#[derive(Debug, Parser)]
#[command(name = "rs-encode")]
#[command(about = "Encode a file into Reed-Solomon (255,223) codewords")]
struct Cli {
    /// Input file
    input: PathBuf,

    /// Output file of concatenated codewords
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    let codec = RsCodec::new();
    let blocks = rsfile::encode_file(&codec, &cli.input, &cli.output)?;

    println!("Encoded {} blocks to {:?}", blocks, cli.output);
    Ok(())
}
