//! Simulated copy keystroke (Cmd+C on macOS, Ctrl+C on Windows).

use std::sync::Arc;
#[cfg(any(target_os = "macos", target_os = "windows"))]
use std::thread;
#[cfg(any(target_os = "macos", target_os = "windows"))]
use std::time::Duration;

#[cfg(any(target_os = "macos", target_os = "windows"))]
use tracing::debug;
use tracing::info;
#[cfg(target_os = "macos")]
use tracing::{instrument, warn};

use crate::error::SelectionError;

pub trait CopySimulator: Send + Sync {
    /// Send the platform copy shortcut to the focused application.
    fn simulate_copy(&self) -> Result<(), SelectionError>;
}

/// Does nothing. Used where no copy injection is implemented.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopCopy;

impl CopySimulator for NoopCopy {
    fn simulate_copy(&self) -> Result<(), SelectionError> {
        Ok(())
    }
}

/// The copy simulator for the build target.
pub fn system_copy_simulator() -> Arc<dyn CopySimulator> {
    #[cfg(target_os = "macos")]
    {
        if !has_accessibility_permission() {
            warn!("Accessibility permission missing; copy simulation will fail until granted");
        }
        Arc::new(MacCopy)
    }
    #[cfg(target_os = "windows")]
    {
        Arc::new(WindowsCopy)
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        info!("No copy simulation on this platform; selection reads the current clipboard");
        Arc::new(NoopCopy)
    }
}

// ============================================================================
// macOS
// ============================================================================

#[cfg(target_os = "macos")]
#[instrument]
pub fn has_accessibility_permission() -> bool {
    let result = macos_accessibility_client::accessibility::application_is_trusted();
    debug!(granted = result, "Checked accessibility permission");
    result
}

/// Show the system prompt asking for Accessibility permission.
#[cfg(target_os = "macos")]
#[instrument]
pub fn request_accessibility_permission() -> bool {
    info!("Requesting accessibility permission");
    let result = macos_accessibility_client::accessibility::application_is_trusted_with_prompt();
    if !result {
        warn!("Accessibility permission denied or pending");
    }
    result
}

/// Cmd+C through Core Graphics events.
#[cfg(target_os = "macos")]
#[derive(Clone, Copy, Debug, Default)]
pub struct MacCopy;

#[cfg(target_os = "macos")]
impl CopySimulator for MacCopy {
    fn simulate_copy(&self) -> Result<(), SelectionError> {
        use core_graphics::event::{CGEvent, CGEventFlags, CGEventTapLocation, CGKeyCode};
        use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

        // 'c' key is keycode 8 on macOS
        const KEY_C: CGKeyCode = 8;

        if !has_accessibility_permission() {
            return Err(SelectionError::CopySimulation(
                "Accessibility permission required".to_string(),
            ));
        }

        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState).map_err(|_| {
            SelectionError::CopySimulation("failed to create CGEventSource".to_string())
        })?;

        let key_down = CGEvent::new_keyboard_event(source.clone(), KEY_C, true).map_err(|_| {
            SelectionError::CopySimulation("failed to create key down event".to_string())
        })?;
        key_down.set_flags(CGEventFlags::CGEventFlagCommand);

        let key_up = CGEvent::new_keyboard_event(source, KEY_C, false).map_err(|_| {
            SelectionError::CopySimulation("failed to create key up event".to_string())
        })?;
        key_up.set_flags(CGEventFlags::CGEventFlagCommand);

        key_down.post(CGEventTapLocation::HID);
        thread::sleep(Duration::from_millis(5));
        key_up.post(CGEventTapLocation::HID);

        debug!("Simulated Cmd+C via Core Graphics");
        Ok(())
    }
}

// ============================================================================
// Windows
// ============================================================================

/// Ctrl+C through `SendInput`.
#[cfg(target_os = "windows")]
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowsCopy;

#[cfg(target_os = "windows")]
impl CopySimulator for WindowsCopy {
    fn simulate_copy(&self) -> Result<(), SelectionError> {
        use windows::Win32::UI::Input::KeyboardAndMouse::{
            SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
            KEYEVENTF_KEYUP, VIRTUAL_KEY, VK_C, VK_CONTROL,
        };

        fn key(vk: VIRTUAL_KEY, flags: KEYBD_EVENT_FLAGS) -> INPUT {
            INPUT {
                r#type: INPUT_KEYBOARD,
                Anonymous: INPUT_0 {
                    ki: KEYBDINPUT {
                        wVk: vk,
                        dwFlags: flags,
                        ..Default::default()
                    },
                },
            }
        }

        let inputs = [
            key(VK_CONTROL, KEYBD_EVENT_FLAGS(0)),
            key(VK_C, KEYBD_EVENT_FLAGS(0)),
            key(VK_C, KEYEVENTF_KEYUP),
            key(VK_CONTROL, KEYEVENTF_KEYUP),
        ];

        let sent = unsafe { SendInput(&inputs, std::mem::size_of::<INPUT>() as i32) };
        if sent as usize != inputs.len() {
            return Err(SelectionError::CopySimulation(format!(
                "SendInput injected {} of {} events",
                sent,
                inputs.len()
            )));
        }

        thread::sleep(Duration::from_millis(5));
        debug!("Simulated Ctrl+C via SendInput");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_copy_succeeds() {
        assert_eq!(NoopCopy.simulate_copy(), Ok(()));
    }
}
