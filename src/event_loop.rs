//! Main-thread OS event pumping.
//!
//! `global-hotkey` delivers events through the creating thread's native event
//! loop on macOS (CFRunLoop) and Windows (message queue). The binary's main
//! loop calls [`pump_os_events`] between command polls so hotkeys keep firing
//! while it waits for stdin.

use std::time::Duration;

/// Process pending OS events for up to `timeout`.
#[cfg(target_os = "macos")]
pub fn pump_os_events(timeout: Duration) {
    use core_foundation::runloop::{kCFRunLoopDefaultMode, CFRunLoop};

    // SAFETY: kCFRunLoopDefaultMode is an immutable CFString constant
    let mode = unsafe { kCFRunLoopDefaultMode };
    CFRunLoop::run_in_mode(mode, timeout, false);
}

#[cfg(target_os = "windows")]
pub fn pump_os_events(timeout: Duration) {
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, PeekMessageW, TranslateMessage, MSG, PM_REMOVE,
    };

    // SAFETY: standard message pump on the thread that owns the hotkey window
    unsafe {
        let mut msg = MSG::default();
        while PeekMessageW(&mut msg, HWND::default(), 0, 0, PM_REMOVE).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
    std::thread::sleep(timeout);
}

/// No native loop needed; just wait.
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
pub fn pump_os_events(timeout: Duration) {
    std::thread::sleep(timeout);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_pump_returns_after_timeout() {
        let start = Instant::now();
        pump_os_events(Duration::from_millis(10));
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
