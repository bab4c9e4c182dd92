//! Windows capture through the Snipping Tool's clip mode.
//!
//! The tool puts the selected region on the clipboard, so the capture polls
//! the clipboard for an image, then kills the tool and clears the clipboard.

use std::process::Command;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::encode::to_data_uri;
use super::ScreenshotCapture;
use crate::clipboard::Clipboard;
use crate::error::{ResultExt, ScreenshotError};

const SNIPPING_TOOL: &str = "snippingtool.exe";

pub struct SnippingToolCapture {
    clipboard: Arc<dyn Clipboard>,
    startup_wait: Duration,
    poll_interval: Duration,
    poll_attempts: u32,
}

impl SnippingToolCapture {
    /// 1 s startup wait, then 5 polls 500 ms apart.
    pub fn new(clipboard: Arc<dyn Clipboard>) -> Self {
        Self::with_timing(
            clipboard,
            Duration::from_millis(1000),
            Duration::from_millis(500),
            5,
        )
    }

    pub fn with_timing(
        clipboard: Arc<dyn Clipboard>,
        startup_wait: Duration,
        poll_interval: Duration,
        poll_attempts: u32,
    ) -> Self {
        Self {
            clipboard,
            startup_wait,
            poll_interval,
            poll_attempts,
        }
    }

    /// Poll the clipboard until it holds an image, the attempts run out, or
    /// `tool_running` reports the tool has exited.
    fn poll_clipboard_image(&self, mut tool_running: impl FnMut() -> bool) -> Option<Vec<u8>> {
        for attempt in 1..=self.poll_attempts {
            thread::sleep(self.poll_interval);
            if let Some(png) = self.clipboard.image_png().filter(|png| !png.is_empty()) {
                debug!(attempt, bytes = png.len(), "Clipboard image found");
                return Some(png);
            }
            if !tool_running() {
                info!(attempt, "Snipping tool exited without an image");
                return None;
            }
        }
        None
    }

    /// Whether a snipping tool process is still listed.
    ///
    /// Matches by image name rather than the spawned child, since the tool
    /// may hand off to another process. If `tasklist` cannot run, assume it is.
    fn tool_running() -> bool {
        match Command::new("tasklist")
            .args(["/FI", &format!("IMAGENAME eq {}", SNIPPING_TOOL)])
            .output()
        {
            Ok(out) => String::from_utf8_lossy(&out.stdout)
                .to_lowercase()
                .contains(SNIPPING_TOOL),
            Err(e) => {
                debug!(error = %e, "tasklist failed");
                true
            }
        }
    }

    fn kill_tool() {
        if let Err(e) = Command::new("taskkill")
            .args(["/IM", SNIPPING_TOOL, "/F"])
            .output()
        {
            debug!(error = %e, "taskkill failed");
        }
    }
}

impl ScreenshotCapture for SnippingToolCapture {
    fn capture(&self) -> Result<String, ScreenshotError> {
        info!("Starting snipping tool");
        Command::new(SNIPPING_TOOL)
            .arg("/clip")
            .spawn()
            .map_err(|e| ScreenshotError::Tool {
                tool: SNIPPING_TOOL.to_string(),
                message: e.to_string(),
            })?;

        thread::sleep(self.startup_wait);
        let image = self.poll_clipboard_image(Self::tool_running);
        Self::kill_tool();

        let Some(png) = image else {
            warn!("Screenshot timeout or cancelled by user");
            return Err(ScreenshotError::Cancelled);
        };

        self.clipboard.clear().warn_on_err();
        info!(bytes = png.len(), "Captured Windows screenshot");
        to_data_uri(&png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectionError;
    use parking_lot::Mutex;

    /// Returns an image on the n-th `image_png` call.
    struct DelayedImageClipboard {
        calls: Mutex<u32>,
        image_on_call: u32,
    }

    impl Clipboard for DelayedImageClipboard {
        fn get_text(&self) -> Result<String, SelectionError> {
            Ok(String::new())
        }

        fn set_text(&self, _text: &str) -> Result<(), SelectionError> {
            Ok(())
        }

        fn image_png(&self) -> Option<Vec<u8>> {
            let mut calls = self.calls.lock();
            *calls += 1;
            (*calls >= self.image_on_call).then(|| vec![1, 2, 3])
        }
    }

    fn capture(image_on_call: u32) -> (SnippingToolCapture, Arc<DelayedImageClipboard>) {
        let clipboard = Arc::new(DelayedImageClipboard {
            calls: Mutex::new(0),
            image_on_call,
        });
        let capture =
            SnippingToolCapture::with_timing(clipboard.clone(), Duration::ZERO, Duration::ZERO, 5);
        (capture, clipboard)
    }

    #[test]
    fn test_poll_finds_image_on_third_attempt() {
        let (capture, clipboard) = capture(3);
        assert_eq!(capture.poll_clipboard_image(|| true), Some(vec![1, 2, 3]));
        assert_eq!(*clipboard.calls.lock(), 3);
    }

    #[test]
    fn test_poll_gives_up_after_budget() {
        let (capture, clipboard) = capture(10);
        assert_eq!(capture.poll_clipboard_image(|| true), None);
        assert_eq!(*clipboard.calls.lock(), 5);
    }

    #[test]
    fn test_poll_stops_when_tool_exits() {
        let (capture, clipboard) = capture(10);
        let mut checks = 0;
        let result = capture.poll_clipboard_image(|| {
            checks += 1;
            checks < 2
        });
        assert_eq!(result, None);
        assert_eq!(*clipboard.calls.lock(), 2);
        assert_eq!(checks, 2);
    }

    #[test]
    fn test_poll_takes_image_found_as_tool_exits() {
        let (capture, clipboard) = capture(1);
        assert_eq!(capture.poll_clipboard_image(|| false), Some(vec![1, 2, 3]));
        assert_eq!(*clipboard.calls.lock(), 1);
    }
}
