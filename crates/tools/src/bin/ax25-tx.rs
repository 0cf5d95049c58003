//! Hamlink AX.25 framing tool.

use anyhow::Result;
use clap::Parser;
use hamlink_tools::tx::{self, TxConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let config = TxConfig::parse();
    let frames = tx::run(&config)?;

    println!("Wrote {} frames to {:?}", frames, config.output);
    Ok(())
}
