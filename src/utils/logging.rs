//! tracing subscriber setup.
//!
//! The filter comes from `CSX_LOG` (e.g. `CSX_LOG=csx=debug`) and defaults
//! to warnings only.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "CSX_LOG";
const DEFAULT_FILTER: &str = "csx=warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Log to stderr (non-interactive commands)
pub fn init_stderr() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Log to a file, appending (interactive mode owns the terminal)
pub fn init_file(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();
    Ok(())
}
