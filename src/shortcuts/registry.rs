//! Shortcut list storage and registration planning.
//!
//! The registry owns the last shortcut list the UI pushed. `plan()` turns it
//! into the ordered set of shortcuts to bind for one registration epoch,
//! recording every entry it drops and why.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::types::{NormalizedCombo, RegisteredShortcut, ShortcutDefinition};
use crate::error::ShortcutListError;
use crate::platform::Platform;

/// Why an entry was not bound to the input hook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The `shortcut` field was empty
    EmptyCombo,
    /// Only separators and whitespace
    NoTokens,
    /// Control-based combo on macOS, where Command is the idiomatic modifier
    ControlOnMacOS,
    /// Same combo string as an earlier entry; the first one wins
    Duplicate,
    /// The input hook refused the combination
    Rejected(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedShortcut {
    pub combo: String,
    pub label: String,
    pub reason: SkipReason,
}

/// Result of filtering the list for one registration epoch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationPlan {
    pub accepted: Vec<RegisteredShortcut>,
    pub skipped: Vec<SkippedShortcut>,
}

/// What `set_shortcut_list` kept and dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShortcutListSummary {
    pub accepted: usize,
    pub malformed: usize,
}

/// Parse the UI's JSON shortcut list.
///
/// The payload must be a JSON array. Entries that are not objects, or whose
/// `label`/`value`/`shortcut` fields are not strings, are dropped and counted.
pub fn parse_shortcut_list(
    json: &str,
) -> Result<(Vec<ShortcutDefinition>, usize), ShortcutListError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(json)?;

    let mut definitions = Vec::with_capacity(entries.len());
    let mut malformed = 0;
    for (index, entry) in entries.into_iter().enumerate() {
        match ShortcutDefinition::deserialize(&entry) {
            Ok(definition) => definitions.push(definition),
            Err(e) => {
                malformed += 1;
                warn!(index, error = %e, entry = %entry, "Skipping malformed shortcut entry");
            }
        }
    }

    Ok((definitions, malformed))
}

/// Holds the current shortcut list.
#[derive(Clone, Debug, Default)]
pub struct ShortcutRegistry {
    definitions: Vec<ShortcutDefinition>,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(definitions: Vec<ShortcutDefinition>) -> Self {
        Self { definitions }
    }

    /// Replace the list with the parsed payload.
    ///
    /// On a top-level parse failure the previous list is left untouched. On
    /// success the list is overwritten, never merged.
    pub fn set_shortcut_list(
        &mut self,
        json: &str,
    ) -> Result<ShortcutListSummary, ShortcutListError> {
        let (definitions, malformed) = parse_shortcut_list(json)?;
        let summary = ShortcutListSummary {
            accepted: definitions.len(),
            malformed,
        };
        self.definitions = definitions;
        info!(
            accepted = summary.accepted,
            malformed = summary.malformed,
            "Shortcut list updated"
        );
        Ok(summary)
    }

    pub fn set_definitions(&mut self, definitions: Vec<ShortcutDefinition>) {
        self.definitions = definitions;
    }

    pub fn definitions(&self) -> &[ShortcutDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Filter the list, in order, into the shortcuts to bind on `platform`.
    pub fn plan(&self, platform: Platform) -> RegistrationPlan {
        let mut plan = RegistrationPlan::default();
        let mut seen: HashSet<&str> = HashSet::new();

        for definition in &self.definitions {
            let combo = definition.combo.as_str();
            let skip = |reason: SkipReason| SkippedShortcut {
                combo: combo.to_string(),
                label: definition.label.clone(),
                reason,
            };

            if combo.is_empty() {
                plan.skipped.push(skip(SkipReason::EmptyCombo));
                continue;
            }

            let Some(hook_keys) = NormalizedCombo::parse(combo, platform) else {
                debug!(combo, "Skipping shortcut with no key tokens");
                plan.skipped.push(skip(SkipReason::NoTokens));
                continue;
            };

            if platform.is_macos() && combo.to_lowercase().contains("ctrl") {
                info!(combo, "Skipping ctrl shortcut on macOS");
                plan.skipped.push(skip(SkipReason::ControlOnMacOS));
                continue;
            }

            if !seen.insert(combo) {
                info!(combo, label = %definition.label, "Skipping duplicate shortcut");
                plan.skipped.push(skip(SkipReason::Duplicate));
                continue;
            }

            plan.accepted.push(RegisteredShortcut {
                combo_key: combo.to_string(),
                hook_keys,
                action: definition.action.clone(),
                label: definition.label.clone(),
            });
        }

        plan
    }
}
