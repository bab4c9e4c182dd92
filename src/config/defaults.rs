//! Default configuration values
//!
//! The delays below stand in for completion signals the OS does not expose.
//! They are approximations tuned by hand, not guaranteed bounds.

/// Wait after simulating the copy keystroke before reading the clipboard back
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 300;
/// Gap between selection acquisition attempts when the result was empty
pub const DEFAULT_RETRY_GAP_MS: u64 = 100;
/// Total acquisition attempts (first try plus retries)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Per-shortcut debounce window
pub const DEFAULT_COOLDOWN_MS: u64 = 3000;

/// Action values that select a dispatch branch other than "ask"
pub const DEFAULT_OPEN_WINDOW_ACTION: &str = "Open Window";
/// "ORC" is the spelling older UI builds persisted
pub const DEFAULT_OCR_ACTIONS: &[&str] = &["OCR", "ORC"];
pub const DEFAULT_CHECK_OCR_REGION: bool = true;

/// Pause after tearing down the previous hook set before registering a new one
pub const DEFAULT_HOOK_CLEANUP_DELAY_MS: u64 = 100;
/// How often the hook pump wakes up to check for a stop request
pub const DEFAULT_HOOK_POLL_INTERVAL_MS: u64 = 50;

/// Network probe used to gate the OCR branch
pub const DEFAULT_PROBE_URL: &str = "https://www.google.com";
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 3000;

/// Default config file location (tilde-expanded)
pub const DEFAULT_CONFIG_PATH: &str = "~/.popask/config.json";
