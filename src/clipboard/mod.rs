//! Clipboard access and copy-keystroke simulation.
//!
//! Both are traits so the selection protocol can be exercised against fakes;
//! [`SystemClipboard`] and [`system_copy_simulator`] are the real thing.

mod copy;
mod system;

pub use copy::{system_copy_simulator, CopySimulator, NoopCopy};
#[cfg(target_os = "macos")]
pub use copy::{has_accessibility_permission, request_accessibility_permission, MacCopy};
#[cfg(target_os = "windows")]
pub use copy::WindowsCopy;
pub use system::SystemClipboard;

use crate::error::SelectionError;

/// Plain-text clipboard with optional image read-back.
pub trait Clipboard: Send + Sync {
    /// Current text content. An empty or non-text clipboard reads as `""`.
    fn get_text(&self) -> Result<String, SelectionError>;

    fn set_text(&self, text: &str) -> Result<(), SelectionError>;

    /// Current image content as PNG bytes, if any.
    fn image_png(&self) -> Option<Vec<u8>> {
        None
    }

    fn clear(&self) -> Result<(), SelectionError> {
        self.set_text("")
    }
}
