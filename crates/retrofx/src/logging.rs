//! Log file setup.
//!
//! The terminal belongs to the UI, so events go to `retrofx.log` in the
//! platform data directory. `RETROFX_LOG` takes an `EnvFilter` directive.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const FILTER_ENV: &str = "RETROFX_LOG";
const DEFAULT_FILTER: &str = "warn";
const LOG_FILE: &str = "retrofx.log";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Returns the log file path, or `None` when
/// no log file could be opened and logging is disabled.
pub fn init() -> Option<PathBuf> {
    let dir = retrofx_config::log_dir()?;
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join(LOG_FILE);
    let file = File::create(&path).ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .ok()?;

    Some(path)
}
