//! PopAsk hotkey engine.
//!
//! Turns a user-defined shortcut list into global key bindings. When a
//! binding fires, the engine reads the user's current selection (or takes a
//! screenshot, or just opens the window) and hands the result to the UI
//! process as a `GET_SELECTION` event.

pub mod clipboard;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod event_loop;
pub mod hotkeys;
pub mod logging;
pub mod network;
pub mod platform;
pub mod screenshot;
pub mod selection;
pub mod shortcuts;
pub mod stdin_commands;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::{HotkeyEngine, RegistrationReport};
pub use error::DispatchError;
pub use platform::Platform;
