//! Station configuration for the framing tools.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use hamlink_frame::frame::LinkConfig;

/// Station addressing options shared by the framing tools.
#[derive(Debug, Clone, Args)]
pub struct StationArgs {
    /// Source station callsign
    #[arg(long, default_value = "N0CALL")]
    pub source: String,

    /// Source station SSID
    #[arg(long, default_value_t = 0)]
    pub source_ssid: u8,

    /// Destination station callsign
    #[arg(long, default_value = "CQ")]
    pub dest: String,

    /// Destination station SSID
    #[arg(long, default_value_t = 0)]
    pub dest_ssid: u8,

    /// Load station addressing from a config file instead
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl StationArgs {
    /// Resolve the link configuration; a config file wins over flags.
    pub fn link_config(&self) -> Result<LinkConfig> {
        if let Some(path) = &self.config {
            return load_link_config(path);
        }
        Ok(LinkConfig {
            source_call: self.source.clone(),
            source_ssid: self.source_ssid,
            dest_call: self.dest.clone(),
            dest_ssid: self.dest_ssid,
        })
    }
}

/// Load a link configuration from a JSON or TOML file.
pub fn load_link_config(path: &Path) -> Result<LinkConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    // Try JSON first, then TOML
    if let Ok(config) = serde_json::from_str(&content) {
        return Ok(config);
    }
    toml::from_str(&content).context("Failed to parse config file")
}

/// Save a link configuration to a TOML file.
pub fn save_link_config(config: &LinkConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;
    Ok(())
}
