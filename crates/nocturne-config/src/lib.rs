//! Configuration for nocturne.
//!
//! Settings persist as a TOML file in the platform config directory. Missing
//! files and missing fields fall back to defaults, and command-line flags
//! override whatever was loaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE, Config, DisplayConfig, LogConfig};
pub use error::ConfigError;
