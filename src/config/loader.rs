//! Configuration loading from file system

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::defaults::DEFAULT_CONFIG_PATH;
use super::types::Config;

/// Resolve `~/.popask/config.json`.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref())
}

/// Load configuration from the default location.
///
/// Returns `Config::default()` if the file is missing or unreadable.
pub fn load_config() -> Config {
    load_config_from(&default_config_path())
}

/// Load configuration from an explicit path.
///
/// Missing file means defaults. A file that exists but fails to parse is
/// logged with a hint and also falls back to defaults, so a typo in the config
/// never keeps the hotkeys from coming up.
#[instrument(name = "load_config")]
pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        info!(path = %path.display(), "Config file not found, using defaults");
        return Config::default();
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read config, using defaults");
            return Config::default();
        }
    };

    match serde_json::from_str::<Config>(&contents) {
        Ok(config) => {
            info!(
                path = %path.display(),
                shortcuts = config.shortcuts.as_ref().map(|s| s.len()).unwrap_or(0),
                "Successfully loaded config"
            );
            config
        }
        Err(e) => {
            let error_hint = if e.is_syntax() || e.is_eof() {
                "\n\nHint: the config must be a single JSON object, e.g.\n\
                {\n  \"dispatch\": { \"cooldownMs\": 3000 },\n  \"selection\": { \"settleDelayMs\": 300 }\n}"
            } else {
                "\n\nHint: check field types; delays are integers in milliseconds."
            };
            warn!(
                path = %path.display(),
                error = %e,
                hint = %error_hint,
                "Failed to parse config JSON, using defaults"
            );
            Config::default()
        }
    }
}
