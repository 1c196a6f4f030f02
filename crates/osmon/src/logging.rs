//! File logging setup.
//!
//! The terminal belongs to the UI, so log records go to a file in the
//! platform data directory. The filter is read from `OSMON_LOG`.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE: &str = "osmon.log";
const FILTER_ENV: &str = "OSMON_LOG";
const DEFAULT_FILTER: &str = "osmon=info";

/// Install the global subscriber. Logging stays disabled if the log file
/// cannot be opened.
pub fn init() {
    let Ok(dir) = osmon_config::data_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
    else {
        return;
    };

    let filter =
        EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
}
