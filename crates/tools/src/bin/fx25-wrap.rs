//! Hamlink FX.25 wrapping tool.

use anyhow::Result;
use clap::Parser;
use hamlink_tools::wrap::{self, WrapConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let config = WrapConfig::parse();
    let frames = wrap::run(&config)?;

    println!("Wrote {} FX.25 frames to {:?}", frames, config.output);
    Ok(())
}
