//! Shortcut registration lifecycle.
//!
//! [`HotkeyEngine`] owns the shortcut list, the input hook and the
//! dispatcher. Each `register_keyboard_shortcut` call starts a new
//! registration epoch: the previous hook set is stopped and dropped, the
//! list is re-planned, and every accepted shortcut is bound to a callback
//! that owns its own copy of the shortcut.

use std::sync::Arc;
use std::thread;

use tracing::{info, instrument, warn};

use crate::config::HookConfig;
use crate::dispatch::Dispatcher;
use crate::error::DispatchError;
use crate::hotkeys::{HookCallback, HookEvent, KeyHook};
use crate::platform::Platform;
use crate::shortcuts::{
    RegisteredShortcut, ShortcutDefinition, ShortcutListSummary, ShortcutRegistry, SkipReason,
    SkippedShortcut,
};

/// Outcome of one registration epoch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    pub registered: Vec<RegisteredShortcut>,
    pub skipped: Vec<SkippedShortcut>,
}

pub struct HotkeyEngine<H: KeyHook> {
    platform: Platform,
    registry: ShortcutRegistry,
    dispatcher: Arc<Dispatcher>,
    hook: H,
    hook_config: HookConfig,
    live: Vec<Arc<RegisteredShortcut>>,
    epoch_active: bool,
    epoch: u64,
}

impl<H: KeyHook> HotkeyEngine<H> {
    pub fn new(
        platform: Platform,
        hook: H,
        dispatcher: Arc<Dispatcher>,
        hook_config: HookConfig,
    ) -> Self {
        Self {
            platform,
            registry: ShortcutRegistry::new(),
            dispatcher,
            hook,
            hook_config,
            live: Vec::new(),
            epoch_active: false,
            epoch: 0,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    pub fn registry(&self) -> &ShortcutRegistry {
        &self.registry
    }

    /// Number of registration epochs started so far.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Shortcuts bound in the current epoch, in list order.
    pub fn live_shortcuts(&self) -> &[Arc<RegisteredShortcut>] {
        &self.live
    }

    pub fn lookup(&self, combo_key: &str) -> Option<&RegisteredShortcut> {
        self.live
            .iter()
            .map(Arc::as_ref)
            .find(|shortcut| shortcut.combo_key == combo_key)
    }

    /// Replace the shortcut list. Takes effect at the next registration.
    pub fn set_shortcut_list(&mut self, json: &str) -> Result<ShortcutListSummary, DispatchError> {
        Ok(self.registry.set_shortcut_list(json)?)
    }

    pub fn set_shortcuts(&mut self, definitions: Vec<ShortcutDefinition>) {
        info!(count = definitions.len(), "Shortcut list set from config");
        self.registry.set_definitions(definitions);
    }

    /// `set_shortcut_list` followed by `register_keyboard_shortcut`.
    pub fn sync_shortcut_list(&mut self, json: &str) -> Result<RegistrationReport, DispatchError> {
        self.set_shortcut_list(json)?;
        self.register_keyboard_shortcut()
    }

    /// Tear down the current hook set and bind the current list.
    ///
    /// Entries the hook rejects are reported as skipped; only a hook that
    /// cannot start is an error.
    #[instrument(skip(self), fields(epoch = self.epoch + 1, platform = %self.platform))]
    pub fn register_keyboard_shortcut(&mut self) -> Result<RegistrationReport, DispatchError> {
        if self.epoch_active {
            self.teardown();
            thread::sleep(self.hook_config.cleanup_delay());
        }

        let plan = self.registry.plan(self.platform);
        let mut report = RegistrationReport {
            registered: Vec::with_capacity(plan.accepted.len()),
            skipped: plan.skipped,
        };

        for shortcut in plan.accepted {
            let shortcut = Arc::new(shortcut);
            let callback: HookCallback = {
                let dispatcher = Arc::clone(&self.dispatcher);
                let shortcut = Arc::clone(&shortcut);
                Arc::new(move |event: &mut HookEvent| {
                    dispatcher.handle_trigger(&shortcut);
                    event.consume();
                })
            };

            match self.hook.register(shortcut.hook_keys.tokens(), callback) {
                Ok(()) => {
                    info!(shortcut = %shortcut.combo_key, keys = %shortcut.hook_keys, "Registered shortcut");
                    report.registered.push(RegisteredShortcut::clone(&shortcut));
                    self.live.push(shortcut);
                }
                Err(e) => {
                    warn!(shortcut = %shortcut.combo_key, error = %e, "Hook rejected shortcut");
                    report.skipped.push(SkippedShortcut {
                        combo: shortcut.combo_key.clone(),
                        label: shortcut.label.clone(),
                        reason: SkipReason::Rejected(e.to_string()),
                    });
                }
            }
        }

        self.epoch_active = true;
        self.epoch += 1;
        self.hook.start()?;

        info!(
            registered = report.registered.len(),
            skipped = report.skipped.len(),
            "Keyboard shortcuts registered"
        );
        Ok(report)
    }

    /// Stop the hook and drop every binding.
    pub fn shutdown(&mut self) {
        if self.epoch_active {
            self.teardown();
            info!("Hotkey engine shut down");
        }
    }

    fn teardown(&mut self) {
        self.hook.stop();
        self.hook.unregister_all();
        self.live.clear();
        self.epoch_active = false;
    }
}

impl<H: KeyHook> Drop for HotkeyEngine<H> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
