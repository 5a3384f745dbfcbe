//! # Logging
//!
//! Installs a `tracing` subscriber that writes to a log file. The TUI owns the
//! terminal, so nothing is ever logged to stdout or stderr.
//!
//! ## Level Resolution
//!
//! 1. `RUST_LOG` environment variable
//! 2. the `level` argument (from `log_level` in the config file)
//! 3. `"info"`
//!
//! ## File Location
//!
//! ```text
//! ~/.local/share/scrolling-menu/scrolling-menu.log
//! ```

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Name of the log file inside the data directory.
pub const LOG_FILE_NAME: &str = "scrolling-menu.log";

/// Platform data directory for this application, if one can be resolved.
pub fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "scrolling-menu").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Resolve the filter directive used by [`init_tracing`].
pub fn filter_directive(level: Option<&str>) -> String {
    std::env::var("RUST_LOG")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| level.map(str::to_string))
        .unwrap_or_else(|| "info".to_string())
}

/// Initialize file logging.
///
/// - Creates the data directory if it doesn't exist
/// - Silently does nothing if the directory or file can't be created
/// - Idempotent: only the first call installs a subscriber
pub fn init_tracing(level: Option<&str>) {
    let Some(dir) = data_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
    else {
        return;
    };

    let filter = EnvFilter::try_new(filter_directive(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_prefers_configured_level_over_default() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert_eq!(filter_directive(Some("debug")), "debug");
        assert_eq!(filter_directive(None), "info");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing(Some("warn"));
        init_tracing(Some("debug"));
        tracing::info!("still works");
    }
}
