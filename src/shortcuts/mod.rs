//! Shortcut list handling.
//!
//! This module provides:
//! - The wire shape of a shortcut entry and combo normalization
//! - The registry that stores the UI's list and plans a registration epoch
//! - A short history of recently fired shortcuts
//!
//! # Example
//!
//! ```ignore
//! use popask::platform::Platform;
//! use popask::shortcuts::ShortcutRegistry;
//!
//! let mut registry = ShortcutRegistry::new();
//! registry.set_shortcut_list(r#"[{"label":"Ask","value":"Ask AI","shortcut":"cmd+1"}]"#)?;
//! let plan = registry.plan(Platform::Windows);
//! assert_eq!(plan.accepted[0].hook_keys.tokens(), ["ctrl", "1"]);
//! ```

mod key_records;
mod registry;
mod types;

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;


pub use key_records::{KeyRecordHistory, KEY_RECORD_CAPACITY};
pub use registry::{
    parse_shortcut_list, RegistrationPlan, ShortcutListSummary, ShortcutRegistry, SkipReason,
    SkippedShortcut,
};
pub use types::{NormalizedCombo, RegisteredShortcut, ShortcutDefinition, COMBO_SEPARATOR};
