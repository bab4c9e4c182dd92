//! Configuration type definitions
//!
//! JSON field names are camelCase to match what the UI layer writes.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::defaults::*;
use crate::shortcuts::ShortcutDefinition;

// ============================================
// SELECTION
// ============================================

/// Timing of the selection acquisition protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionConfig {
    /// Wait after the simulated copy before reading the clipboard (default: 300)
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Gap between attempts when the selection came back empty (default: 100)
    #[serde(default = "default_retry_gap_ms")]
    pub retry_gap_ms: u64,
    /// Total attempts, including the first (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_settle_delay_ms() -> u64 {
    DEFAULT_SETTLE_DELAY_MS
}
fn default_retry_gap_ms() -> u64 {
    DEFAULT_RETRY_GAP_MS
}
fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for SelectionConfig {
    fn default() -> Self {
        SelectionConfig {
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            retry_gap_ms: DEFAULT_RETRY_GAP_MS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl SelectionConfig {
    /// No waits at all. Used by tests and by embedders that drive a fake clipboard.
    pub fn immediate() -> Self {
        SelectionConfig {
            settle_delay_ms: 0,
            retry_gap_ms: 0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn retry_gap(&self) -> Duration {
        Duration::from_millis(self.retry_gap_ms)
    }

    /// Attempt budget, never below one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

// ============================================
// DISPATCH
// ============================================

/// Action routing and debounce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchConfig {
    /// Per-shortcut cooldown in milliseconds (default: 3000)
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
    /// Action value that only opens the main window (default: "Open Window")
    #[serde(default = "default_open_window_action")]
    pub open_window_action: String,
    /// Action values that capture a screenshot (default: ["OCR", "ORC"])
    #[serde(default = "default_ocr_actions")]
    pub ocr_actions: Vec<String>,
    /// Probe the network before the OCR branch (default: true)
    #[serde(default = "default_check_ocr_region")]
    pub check_ocr_region: bool,
}

fn default_cooldown_ms() -> u64 {
    DEFAULT_COOLDOWN_MS
}
fn default_open_window_action() -> String {
    DEFAULT_OPEN_WINDOW_ACTION.to_string()
}
fn default_ocr_actions() -> Vec<String> {
    DEFAULT_OCR_ACTIONS.iter().map(|s| s.to_string()).collect()
}
fn default_check_ocr_region() -> bool {
    DEFAULT_CHECK_OCR_REGION
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            open_window_action: default_open_window_action(),
            ocr_actions: default_ocr_actions(),
            check_ocr_region: DEFAULT_CHECK_OCR_REGION,
        }
    }
}

impl DispatchConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

// ============================================
// HOOK
// ============================================

/// OS input hook lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookConfig {
    /// Pause between tearing down and re-registering hooks (default: 100)
    #[serde(default = "default_cleanup_delay_ms")]
    pub cleanup_delay_ms: u64,
    /// Pump wake-up interval for stop checks (default: 50)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_cleanup_delay_ms() -> u64 {
    DEFAULT_HOOK_CLEANUP_DELAY_MS
}
fn default_poll_interval_ms() -> u64 {
    DEFAULT_HOOK_POLL_INTERVAL_MS
}

impl Default for HookConfig {
    fn default() -> Self {
        HookConfig {
            cleanup_delay_ms: DEFAULT_HOOK_CLEANUP_DELAY_MS,
            poll_interval_ms: DEFAULT_HOOK_POLL_INTERVAL_MS,
        }
    }
}

impl HookConfig {
    pub fn cleanup_delay(&self) -> Duration {
        Duration::from_millis(self.cleanup_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

// ============================================
// NETWORK
// ============================================

/// Reachability probe for the OCR region check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    #[serde(default = "default_probe_url")]
    pub probe_url: String,
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_probe_url() -> String {
    DEFAULT_PROBE_URL.to_string()
}
fn default_probe_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT_MS
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            probe_url: default_probe_url(),
            timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
        }
    }
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

// ============================================
// MAIN CONFIG
// ============================================

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub hook: HookConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    /// Shortcut list to register at startup, before the UI syncs its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcuts: Option<Vec<ShortcutDefinition>>,
}
