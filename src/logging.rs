//! File-backed tracing setup.
//!
//! The TUI owns stdout and stderr while it runs, so logs go to a file.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "questionnaire=debug";

const LOG_FILENAME: &str = "debug.log";

/// Returns the default log file location.
///
/// `<cache dir>/questionnaire/debug.log`, or `./debug.log` when the
/// platform has no cache directory.
pub fn default_log_path() -> PathBuf {
    match dirs::cache_dir() {
        Some(dir) => dir.join("questionnaire").join(LOG_FILENAME),
        None => PathBuf::from(LOG_FILENAME),
    }
}

/// Resolve the filter: explicit directive, then `RUST_LOG`, then default.
pub fn build_filter(directive: Option<&str>) -> Result<EnvFilter> {
    match directive {
        Some(d) => EnvFilter::try_new(d).map_err(|e| Error::Logging(e.to_string())),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Open (append) the log file, creating parent directories.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Install the global subscriber writing to `path`.
pub fn init_tracing(path: &Path, directive: Option<&str>) -> Result<()> {
    let filter = build_filter(directive)?;
    let file = open_log_file(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
