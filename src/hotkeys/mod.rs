//! Global input hook.
//!
//! [`KeyHook`] is the seam the engine drives; [`GlobalHotkeyHook`] implements
//! it on top of the `global-hotkey` crate.

mod backend;
mod global;
mod keys;

pub use backend::{HookCallback, HookEvent, KeyHook};
pub use global::GlobalHotkeyHook;
pub use keys::{canonicalize_key, key_code, modifier_flag, parse_combo};
