//! AX.25 framing stage: payload file to hex-dumped frames.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

use hamlink_frame::packetize::packetize;

use crate::config::StationArgs;
use crate::hexdump;

/// Frame a payload file into hex-dumped AX.25 packets
#[derive(Debug, Parser)]
#[command(name = "ax25-tx")]
#[command(about = "Frame a payload file into hex-dumped AX.25 packets")]
pub struct TxConfig {
    /// Input payload file
    pub input: PathBuf,

    /// Output packet dump
    pub output: PathBuf,

    #[command(flatten)]
    pub station: StationArgs,
}

/// Run the framing stage; returns the number of frames written.
pub fn run(config: &TxConfig) -> Result<usize> {
    let payload = std::fs::read(&config.input)
        .with_context(|| format!("Failed to read input file: {:?}", config.input))?;
    anyhow::ensure!(!payload.is_empty(), "no data read from {:?}", config.input);

    let link = config.station.link_config()?;
    let frames = packetize(&link, &payload)?;
    info!(
        bytes = payload.len(),
        frames = frames.len(),
        "packetizing payload"
    );

    let file = File::create(&config.output)
        .with_context(|| format!("Failed to create output file: {:?}", config.output))?;
    let mut out = BufWriter::new(file);
    for (index, frame) in frames.iter().enumerate() {
        hexdump::write_packet(&mut out, index, frame)?;
    }
    out.flush()?;

    Ok(frames.len())
}
