//! Selection acquisition through the clipboard.
//!
//! To read what the user has highlighted in another application:
//! 1. Save the current clipboard text
//! 2. Clear the clipboard
//! 3. Simulate the copy shortcut
//! 4. Wait for the target application to fill the clipboard
//! 5. Read the clipboard, then put the saved text back
//!
//! The saved text is restored on every path out of an attempt, including
//! failures, through [`RestoreGuard`].

use std::sync::Arc;
use std::thread;

use tracing::{debug, instrument, warn};

use crate::clipboard::{Clipboard, CopySimulator};
use crate::config::SelectionConfig;
use crate::error::SelectionError;

/// Puts the saved clipboard text back when dropped, unless already restored.
struct RestoreGuard<'a> {
    clipboard: &'a dyn Clipboard,
    saved: Option<String>,
}

impl<'a> RestoreGuard<'a> {
    fn new(clipboard: &'a dyn Clipboard, saved: String) -> Self {
        Self {
            clipboard,
            saved: Some(saved),
        }
    }

    fn restore(&mut self) -> Result<(), SelectionError> {
        match self.saved.take() {
            Some(saved) => self.clipboard.set_text(&saved),
            None => Ok(()),
        }
    }
}

impl Drop for RestoreGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "Failed to restore clipboard after aborted copy");
        }
    }
}

pub struct SelectionAcquirer {
    clipboard: Arc<dyn Clipboard>,
    copier: Arc<dyn CopySimulator>,
    config: SelectionConfig,
}

impl SelectionAcquirer {
    pub fn new(
        clipboard: Arc<dyn Clipboard>,
        copier: Arc<dyn CopySimulator>,
        config: SelectionConfig,
    ) -> Self {
        Self {
            clipboard,
            copier,
            config,
        }
    }

    /// One attempt at reading the selection, trimmed of surrounding whitespace.
    ///
    /// The clipboard holds its previous text again when this returns. A
    /// failed restore on the success path is logged and the text still
    /// returned.
    pub fn acquire(&self) -> Result<String, SelectionError> {
        let clipboard = self.clipboard.as_ref();
        let saved = clipboard.get_text()?;
        let mut guard = RestoreGuard::new(clipboard, saved);

        clipboard.set_text("")?;
        self.copier.simulate_copy()?;
        thread::sleep(self.config.settle_delay());
        let copied = clipboard.get_text()?;

        if let Err(e) = guard.restore() {
            warn!(error = %e, "Failed to restore clipboard, keeping copied text");
        }

        Ok(copied.trim().to_string())
    }

    /// Run [`acquire`](Self::acquire) until it yields non-empty text or the
    /// attempt budget runs out.
    ///
    /// Errors are retried like empty results. When every attempt comes back
    /// empty the result is `Ok("")`; when the last attempt failed, its error.
    #[instrument(skip(self), fields(attempts = self.config.attempts()))]
    pub fn acquire_with_retries(&self) -> Result<String, SelectionError> {
        let attempts = self.config.attempts();
        let mut last = Ok(String::new());

        for attempt in 1..=attempts {
            if attempt > 1 {
                thread::sleep(self.config.retry_gap());
            }
            match self.acquire() {
                Ok(text) if !text.is_empty() => {
                    debug!(attempt, text_len = text.len(), "Selection acquired");
                    return Ok(text);
                }
                Ok(_) => {
                    debug!(attempt, "Selection empty");
                    last = Ok(String::new());
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Selection attempt failed");
                    last = Err(e);
                }
            }
        }

        last
    }
}
