//! File logging. The terminal belongs to the sky, so nothing is written to
//! stdout or stderr once the UI is up.

use std::fs::OpenOptions;
use std::sync::Mutex;

use nocturne_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. `RUST_LOG` takes precedence over the
/// configured level. No subscriber is installed without a log path.
pub fn init(config: &Config) -> color_eyre::Result<()> {
    let Some(path) = config.log_path() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter(&config.log.level))
        .with(file_layer)
        .try_init()?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
