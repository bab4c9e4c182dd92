//! `global-hotkey` backed input hook.
//!
//! Bindings are registered with a [`GlobalHotKeyManager`]; a pump thread reads
//! the crate's global event receiver and calls the callback bound to each
//! pressed hotkey id. The pump wakes every `poll_interval` to notice `stop()`.
//!
//! NOTE: on macOS the manager must be created on the main thread, and events
//! are only produced while that thread runs an event loop.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use global_hotkey::{
    hotkey::HotKey, Error as HotkeyError, GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::backend::{HookCallback, HookEvent, KeyHook};
use super::keys::parse_combo;
use crate::error::HookError;

type CallbackMap = Arc<Mutex<HashMap<u32, HookCallback>>>;

pub struct GlobalHotkeyHook {
    manager: GlobalHotKeyManager,
    hotkeys: Vec<HotKey>,
    callbacks: CallbackMap,
    running: Arc<AtomicBool>,
    pump: Option<JoinHandle<()>>,
    poll_interval: Duration,
}

impl GlobalHotkeyHook {
    pub fn new(poll_interval: Duration) -> Result<Self, HookError> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| HookError::Backend(e.to_string()))?;
        Ok(Self {
            manager,
            hotkeys: Vec::new(),
            callbacks: Arc::new(Mutex::new(HashMap::new())),
            running: Arc::new(AtomicBool::new(false)),
            pump: None,
            poll_interval,
        })
    }

    pub fn registered_count(&self) -> usize {
        self.hotkeys.len()
    }
}

/// Describe a registration failure for logs and skip reports.
fn format_hotkey_error(e: &HotkeyError) -> String {
    match e {
        HotkeyError::AlreadyRegistered(hk) => format!(
            "already registered by another application (ID: {})",
            hk.id()
        ),
        HotkeyError::FailedToRegister(msg) => format!("{} (may be reserved by the system)", msg),
        HotkeyError::OsError(os_err) => format!("OS error: {}", os_err),
        other => other.to_string(),
    }
}

/// Discard every event already queued, returning how many were dropped.
///
/// Presses queued while a previous pump was busy must not reach bindings
/// made after them.
fn drain_pending<E>(mut next: impl FnMut() -> Option<E>) -> usize {
    let mut dropped = 0;
    while next().is_some() {
        dropped += 1;
    }
    dropped
}

fn run_pump(callbacks: CallbackMap, running: Arc<AtomicBool>, poll_interval: Duration) {
    let receiver = GlobalHotKeyEvent::receiver();
    while running.load(Ordering::SeqCst) {
        let event = match receiver.recv_timeout(poll_interval) {
            Ok(event) => event,
            Err(e) if e.is_timeout() => continue,
            Err(_) => {
                warn!("Hotkey event channel disconnected, stopping pump");
                break;
            }
        };

        // Only respond to key PRESS, not release
        if event.state != HotKeyState::Pressed {
            continue;
        }

        let callback = callbacks.lock().get(&event.id).cloned();
        match callback {
            Some(callback) => {
                let mut hook_event = HookEvent::new(event.id);
                callback(&mut hook_event);
                debug!(
                    id = event.id,
                    consumed = hook_event.is_consumed(),
                    "Hotkey event handled"
                );
            }
            None => debug!(id = event.id, "Hotkey event with no binding"),
        }
    }
}

impl KeyHook for GlobalHotkeyHook {
    fn register(&mut self, keys: &[String], callback: HookCallback) -> Result<(), HookError> {
        let (modifiers, code) = parse_combo(keys)?;
        let hotkey = HotKey::new(Some(modifiers), code);
        let combo = keys.join("+");

        self.manager
            .register(hotkey)
            .map_err(|e| HookError::Rejected {
                combo: combo.clone(),
                message: format_hotkey_error(&e),
            })?;

        self.callbacks.lock().insert(hotkey.id(), callback);
        self.hotkeys.push(hotkey);
        debug!(combo = %combo, id = hotkey.id(), "Registered hotkey");
        Ok(())
    }

    fn start(&mut self) -> Result<(), HookError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let receiver = GlobalHotKeyEvent::receiver();
        let stale = drain_pending(|| receiver.try_recv().ok());
        if stale > 0 {
            debug!(stale, "Dropped hotkey events queued before start");
        }

        let callbacks = Arc::clone(&self.callbacks);
        let running = Arc::clone(&self.running);
        let poll_interval = self.poll_interval;
        let handle = std::thread::Builder::new()
            .name("popask-hotkeys".to_string())
            .spawn(move || run_pump(callbacks, running, poll_interval))
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                HookError::Backend(format!("failed to spawn hotkey pump: {}", e))
            })?;
        self.pump = Some(handle);
        info!(hotkeys = self.hotkeys.len(), "Hotkey pump started");
        Ok(())
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.pump.take() {
            if handle.join().is_err() {
                warn!("Hotkey pump thread panicked");
            }
            info!("Hotkey pump stopped");
        }
    }

    fn unregister_all(&mut self) {
        if self.hotkeys.is_empty() {
            return;
        }
        if let Err(e) = self.manager.unregister_all(&self.hotkeys) {
            warn!(error = %e, "Failed to unregister some hotkeys");
        }
        let count = self.hotkeys.len();
        self.hotkeys.clear();
        self.callbacks.lock().clear();
        debug!(count, "Unregistered hotkeys");
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for GlobalHotkeyHook {
    fn drop(&mut self) {
        self.stop();
        self.unregister_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_pending_empties_queue() {
        let (tx, rx) = async_channel::unbounded();
        for id in [1u32, 2, 3] {
            tx.try_send(id).unwrap();
        }
        assert_eq!(drain_pending(|| rx.try_recv().ok()), 3);
        assert!(rx.is_empty());

        tx.try_send(4).unwrap();
        assert_eq!(rx.try_recv().unwrap(), 4);
    }

    #[test]
    fn test_drain_pending_on_empty_queue() {
        let (_tx, rx) = async_channel::unbounded::<u32>();
        assert_eq!(drain_pending(|| rx.try_recv().ok()), 0);
    }
}

#[cfg(all(test, feature = "system-tests"))]
mod system_tests {
    use super::*;

    // Requires a desktop session; registration fails headless.
    #[test]
    fn test_register_and_unregister() {
        let Ok(mut hook) = GlobalHotkeyHook::new(Duration::from_millis(10)) else {
            return;
        };
        let callback: HookCallback = Arc::new(|event: &mut HookEvent| event.consume());
        let keys = vec!["ctrl".to_string(), "shift".to_string(), "f19".to_string()];
        if hook.register(&keys, callback).is_ok() {
            assert_eq!(hook.registered_count(), 1);
        }
        hook.start().unwrap();
        assert!(hook.is_running());
        hook.stop();
        hook.unregister_all();
        assert_eq!(hook.registered_count(), 0);
        assert!(!hook.is_running());
    }
}
