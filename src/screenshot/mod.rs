//! Screenshot capture for the OCR action.
//!
//! Every strategy returns a `data:image/png;base64,` URI. Which strategy runs
//! depends on the platform:
//! - macOS: `screencapture -i`
//! - Windows: Snipping Tool clip mode, read back from the clipboard
//! - Linux: `gnome-screenshot -a`, falling back to a full-monitor capture
//!   when built with `screen-capture`

mod encode;
mod external;
#[cfg(feature = "screen-capture")]
mod monitor;
mod snipping;

use std::sync::Arc;

use tracing::warn;

pub use encode::{encode_rgba_png, screenshot_filename, to_data_uri, PNG_DATA_URI_PREFIX};
pub use external::ExternalToolCapture;
#[cfg(feature = "screen-capture")]
pub use monitor::MonitorCapture;
pub use snipping::SnippingToolCapture;

use crate::clipboard::Clipboard;
use crate::error::ScreenshotError;
use crate::platform::Platform;

pub trait ScreenshotCapture: Send + Sync {
    /// Capture a screenshot as a PNG data URI.
    fn capture(&self) -> Result<String, ScreenshotError>;
}

/// Tries `primary`, then `fallback` unless the user cancelled.
pub struct FallbackCapture {
    primary: Box<dyn ScreenshotCapture>,
    fallback: Box<dyn ScreenshotCapture>,
}

impl FallbackCapture {
    pub fn new(primary: Box<dyn ScreenshotCapture>, fallback: Box<dyn ScreenshotCapture>) -> Self {
        Self { primary, fallback }
    }
}

impl ScreenshotCapture for FallbackCapture {
    fn capture(&self) -> Result<String, ScreenshotError> {
        match self.primary.capture() {
            Err(ScreenshotError::Cancelled) => Err(ScreenshotError::Cancelled),
            Err(e) => {
                warn!(error = %e, "Screenshot failed, trying fallback");
                self.fallback.capture()
            }
            ok => ok,
        }
    }
}

/// Always fails with `Unsupported`.
#[derive(Clone, Copy, Debug)]
pub struct UnsupportedCapture(pub Platform);

impl ScreenshotCapture for UnsupportedCapture {
    fn capture(&self) -> Result<String, ScreenshotError> {
        Err(ScreenshotError::Unsupported(self.0.name().to_string()))
    }
}

/// The capture strategy for `platform`.
pub fn system_screenshot_capture(
    platform: Platform,
    clipboard: Arc<dyn Clipboard>,
) -> Arc<dyn ScreenshotCapture> {
    match platform {
        Platform::MacOS => Arc::new(ExternalToolCapture::screencapture()),
        Platform::Windows => Arc::new(SnippingToolCapture::new(clipboard)),
        #[cfg(feature = "screen-capture")]
        Platform::Linux => Arc::new(FallbackCapture::new(
            Box::new(ExternalToolCapture::gnome_screenshot()),
            Box::new(MonitorCapture),
        )),
        #[cfg(not(feature = "screen-capture"))]
        Platform::Linux => Arc::new(ExternalToolCapture::gnome_screenshot()),
        #[cfg(feature = "screen-capture")]
        Platform::Other => Arc::new(MonitorCapture),
        #[cfg(not(feature = "screen-capture"))]
        Platform::Other => Arc::new(UnsupportedCapture(platform)),
    }
}
