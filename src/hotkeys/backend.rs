//! The OS input hook seam.
//!
//! The engine only needs four things from a hook: bind a key combination to a
//! callback, start delivering events, stop, and drop every binding. Anything
//! that can do that (the `global-hotkey` backend, a test fake) implements
//! [`KeyHook`].

use std::sync::Arc;

use crate::error::HookError;

/// One delivered key event.
///
/// `raw_code` identifies the binding that fired. Setting it to zero marks the
/// event as handled. The `global-hotkey` backend only logs the flag: OS-level
/// hotkey registration (`RegisterHotKey`, Carbon hotkeys) already swallows the
/// key, so nothing reaches other applications either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HookEvent {
    pub raw_code: u32,
}

impl HookEvent {
    pub fn new(raw_code: u32) -> Self {
        Self { raw_code }
    }

    pub fn consume(&mut self) {
        self.raw_code = 0;
    }

    pub fn is_consumed(&self) -> bool {
        self.raw_code == 0
    }
}

/// Invoked on the hook's delivery thread for every press of a bound combo.
pub type HookCallback = Arc<dyn Fn(&mut HookEvent) + Send + Sync>;

pub trait KeyHook {
    /// Bind `keys` (normalized lowercase tokens) to `callback`.
    fn register(&mut self, keys: &[String], callback: HookCallback) -> Result<(), HookError>;

    /// Begin delivering events. Calling it while running is a no-op.
    fn start(&mut self) -> Result<(), HookError>;

    /// Stop delivering events. Bindings are kept until `unregister_all`.
    fn stop(&mut self);

    /// Drop every binding made since the last call.
    fn unregister_all(&mut self);

    fn is_running(&self) -> bool;
}
