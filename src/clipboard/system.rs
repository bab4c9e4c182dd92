use parking_lot::Mutex;
use tracing::{debug, warn};

use super::Clipboard;
use crate::error::SelectionError;
use crate::screenshot::encode_rgba_png;

/// The OS clipboard via `arboard`.
pub struct SystemClipboard {
    inner: Mutex<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, SelectionError> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| SelectionError::ClipboardRead(format!("failed to access clipboard: {}", e)))?;
        Ok(Self {
            inner: Mutex::new(inner),
        })
    }
}

impl Clipboard for SystemClipboard {
    fn get_text(&self) -> Result<String, SelectionError> {
        match self.inner.lock().get_text() {
            Ok(text) => Ok(text),
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(e) => Err(SelectionError::ClipboardRead(e.to_string())),
        }
    }

    fn set_text(&self, text: &str) -> Result<(), SelectionError> {
        self.inner
            .lock()
            .set_text(text)
            .map_err(|e| SelectionError::ClipboardWrite(e.to_string()))
    }

    fn image_png(&self) -> Option<Vec<u8>> {
        let image = match self.inner.lock().get_image() {
            Ok(image) => image,
            Err(arboard::Error::ContentNotAvailable) => return None,
            Err(e) => {
                debug!(error = %e, "No readable image on clipboard");
                return None;
            }
        };

        match encode_rgba_png(image.width as u32, image.height as u32, image.bytes.into_owned()) {
            Ok(png) => Some(png),
            Err(e) => {
                warn!(error = %e, "Failed to encode clipboard image");
                None
            }
        }
    }

    fn clear(&self) -> Result<(), SelectionError> {
        self.inner
            .lock()
            .clear()
            .map_err(|e| SelectionError::ClipboardWrite(e.to_string()))
    }
}

#[cfg(all(test, feature = "system-tests"))]
mod system_tests {
    use super::*;

    #[test]
    fn test_text_round_trip_restores_original() {
        let clipboard = SystemClipboard::new().unwrap();
        let original = clipboard.get_text().unwrap();
        clipboard.set_text("popask clipboard test").unwrap();
        assert_eq!(clipboard.get_text().unwrap(), "popask clipboard test");
        clipboard.set_text(&original).unwrap();
    }
}
