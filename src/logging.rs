//! Structured JSONL logging for post-mortem analysis and human-readable stderr output.
//!
//! This module provides dual-output logging:
//! - **JSONL to file** (`<data dir>/popask/logs/popask.jsonl`) - structured for tooling
//! - **Compact to stderr** - human-readable for developers
//!
//! stdout is reserved for the outbound event stream, so nothing here writes to it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use popask::logging;
//!
//! // Initialize logging - MUST keep guard alive for duration of program
//! let _guard = logging::init();
//!
//! tracing::info!(event_type = "hotkey", shortcut = "cmd+1", "Shortcut triggered");
//! ```

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_NAME: &str = "popask.jsonl";

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the dual-output logging system.
///
/// Returns a guard that MUST be kept alive for the duration of the program.
/// If the log file cannot be opened, only the stderr layer is installed.
pub fn init() -> LoggingGuard {
    let log_dir = log_dir();
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }

    let log_path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| eprintln!("[LOGGING] Failed to open log file: {}", e))
        .ok();

    // Environment filter - default to info, allow override via RUST_LOG
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ureq=warn"));

    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    let (json_layer, file_guard) = match file {
        Some(file) => {
            // Non-blocking so a slow disk never stalls the hook thread
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_target(true)
                .with_level(true)
                .with_thread_names(true)
                .with_file(false)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .init();

    tracing::info!(
        event_type = "app_lifecycle",
        action = "started",
        log_path = %log_path.display(),
        "Application logging initialized"
    );

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// Get the log directory path (`<data dir>/popask/logs`).
fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .map(|d| d.join("popask").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("popask-logs"))
}

/// Get the path to the JSONL log file
pub fn log_path() -> PathBuf {
    log_dir().join(LOG_FILE_NAME)
}

/// Category-tagged log line.
///
/// Prefer tracing macros directly for structured fields:
/// ```rust,ignore
/// tracing::info!(category = "HOTKEY", shortcut = "cmd+1", "Registered");
/// ```
pub fn log(category: &str, message: &str) {
    tracing::info!(category = category, "{}", message);
}

/// Log an error with structured fields and context
pub fn log_error(category: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        event_type = "error",
        category = category,
        error_message = error,
        context = context,
        "{}: {}",
        category,
        error
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_ends_with_jsonl_file() {
        let path = log_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(LOG_FILE_NAME));
        assert!(path.parent().is_some_and(|p| p.ends_with("logs")));
    }
}
