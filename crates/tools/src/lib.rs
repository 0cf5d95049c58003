//! Hamlink Tools library

pub mod config;
pub mod hexdump;
pub mod tx;
pub mod wrap;
pub mod rsfile;

pub use config::{load_link_config, save_link_config, StationArgs};
pub use rsfile::DecodeStats;
pub use tx::TxConfig;
pub use wrap::WrapConfig;
