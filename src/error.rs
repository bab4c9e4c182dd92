use thiserror::Error;
use tracing::{error, warn};

/// The inbound shortcut list could not be parsed at all.
///
/// Individual malformed entries are skipped instead; this is only raised when
/// the payload as a whole is not a JSON array.
#[derive(Error, Debug)]
pub enum ShortcutListError {
    #[error("failed to unmarshal shortcut list: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Failures of a single selection acquisition attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("failed to read clipboard text: {0}")]
    ClipboardRead(String),

    #[error("failed to write clipboard text: {0}")]
    ClipboardWrite(String),

    #[error("failed to simulate copy: {0}")]
    CopySimulation(String),
}

/// Failures of a screenshot capture. Never retried.
#[derive(Error, Debug)]
pub enum ScreenshotError {
    #[error("failed to run screenshot tool '{tool}': {message}")]
    Tool { tool: String, message: String },

    #[error("failed to read screenshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("screenshot timeout or cancelled by user")]
    Cancelled,

    #[error("failed to encode screenshot: {0}")]
    Encode(String),

    #[error("screenshots are not supported on {0}")]
    Unsupported(String),
}

/// Failures reported by the OS input hook.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HookError {
    #[error("key combination has no keys")]
    EmptyCombo,

    #[error("unknown key '{0}'")]
    UnknownKey(String),

    #[error("key combination '{combo}' has no main key, only modifiers")]
    MissingKey { combo: String },

    #[error("system rejected hotkey '{combo}': {message}")]
    Rejected { combo: String, message: String },

    #[error("input hook backend unavailable: {0}")]
    Backend(String),
}

/// Umbrella error for the engine's public surface.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    ShortcutList(#[from] ShortcutListError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Screenshot(#[from] ScreenshotError),

    #[error(transparent)]
    Hook(#[from] HookError),
}

impl DispatchError {
    /// Message suitable for showing in the UI layer.
    pub fn user_message(&self) -> String {
        match self {
            Self::ShortcutList(e) => format!("Shortcut list is invalid: {}", e),
            Self::Selection(e) => format!("Could not read the current selection: {}", e),
            Self::Screenshot(e) => format!("Could not capture a screenshot: {}", e),
            Self::Hook(e) => format!("Could not register shortcut: {}", e),
        }
    }
}

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the user doesn't need to know.
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_list_wraps_serde_error() {
        let err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err = DispatchError::from(ShortcutListError::from(err));
        assert!(err.to_string().starts_with("failed to unmarshal shortcut list"));
        assert!(err.user_message().starts_with("Shortcut list is invalid"));
    }

    #[test]
    fn log_err_returns_value_on_ok() {
        let ok: std::result::Result<u32, String> = Ok(7);
        assert_eq!(ok.log_err(), Some(7));
        let err: std::result::Result<u32, String> = Err("boom".into());
        assert_eq!(err.warn_on_err(), None);
    }
}
