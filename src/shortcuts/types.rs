//! Shortcut definitions and combo normalization.
//!
//! This module provides:
//! - `ShortcutDefinition` - one entry of the UI's shortcut list, as sent over the wire
//! - `NormalizedCombo` - the platform-neutral key tokens handed to the input hook
//! - `RegisteredShortcut` - a definition that survived filtering for one registration epoch

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::platform::Platform;

/// Separator between key names in a combo string (`"cmd+shift+1"`).
pub const COMBO_SEPARATOR: char = '+';

/// A user-facing shortcut entry.
///
/// Wire names are `label` / `value` / `shortcut`; missing fields read as empty
/// strings, so an entry without a `shortcut` is simply skipped at registration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShortcutDefinition {
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "value")]
    pub action: String,
    #[serde(default, rename = "shortcut")]
    pub combo: String,
}

impl ShortcutDefinition {
    pub fn new(
        label: impl Into<String>,
        action: impl Into<String>,
        combo: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
            combo: combo.into(),
        }
    }
}

/// Ordered, non-empty sequence of lowercase key tokens.
///
/// Built by splitting on `+`, trimming, dropping empty pieces and, off macOS,
/// rewriting `cmd` to `ctrl`. Normalizing the joined form of a normalized
/// combo yields the same tokens.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NormalizedCombo {
    tokens: Vec<String>,
}

impl NormalizedCombo {
    /// Normalize a raw combo string. Returns `None` when no tokens remain.
    pub fn parse(combo: &str, platform: Platform) -> Option<Self> {
        let tokens: Vec<String> = combo
            .split(COMBO_SEPARATOR)
            .map(|part| part.trim().to_lowercase())
            .filter(|part| !part.is_empty())
            .map(|part| {
                if part == "cmd" && !platform.is_macos() {
                    "ctrl".to_string()
                } else {
                    part
                }
            })
            .collect();

        if tokens.is_empty() {
            None
        } else {
            Some(Self { tokens })
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn to_combo_string(&self) -> String {
        self.tokens.join("+")
    }
}

impl fmt::Display for NormalizedCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_combo_string())
    }
}

/// A shortcut accepted for the current registration epoch.
///
/// `combo_key` is the original, untouched combo string. It is the identity used
/// for deduplication, cooldowns and the outbound `shortcut` field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisteredShortcut {
    pub combo_key: String,
    pub hook_keys: NormalizedCombo,
    pub action: String,
    pub label: String,
}
