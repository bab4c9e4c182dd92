//! In-memory fakes for the external capabilities.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::clipboard::{Clipboard, CopySimulator};
use crate::config::{DispatchConfig, SelectionConfig};
use crate::dispatch::{Dispatcher, EventSink, UiEvent};
use crate::error::{ScreenshotError, SelectionError};
use crate::network::StaticRegionProbe;
use crate::screenshot::ScreenshotCapture;
use crate::selection::SelectionAcquirer;

#[derive(Default)]
pub struct MemoryClipboard {
    pub text: Mutex<String>,
}

impl MemoryClipboard {
    pub fn with_text(text: &str) -> Arc<Self> {
        Arc::new(Self {
            text: Mutex::new(text.to_string()),
        })
    }

    pub fn text(&self) -> String {
        self.text.lock().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&self) -> Result<String, SelectionError> {
        Ok(self.text.lock().clone())
    }

    fn set_text(&self, text: &str) -> Result<(), SelectionError> {
        *self.text.lock() = text.to_string();
        Ok(())
    }
}

/// "Copies" a fixed selection into the clipboard, or fails every time.
pub struct FixedCopy {
    pub clipboard: Arc<MemoryClipboard>,
    pub selection: Result<String, SelectionError>,
    pub calls: Mutex<u32>,
}

impl FixedCopy {
    pub fn selecting(clipboard: &Arc<MemoryClipboard>, selection: &str) -> Arc<Self> {
        Arc::new(Self {
            clipboard: Arc::clone(clipboard),
            selection: Ok(selection.to_string()),
            calls: Mutex::new(0),
        })
    }

    pub fn failing(clipboard: &Arc<MemoryClipboard>, message: &str) -> Arc<Self> {
        Arc::new(Self {
            clipboard: Arc::clone(clipboard),
            selection: Err(SelectionError::CopySimulation(message.to_string())),
            calls: Mutex::new(0),
        })
    }

    pub fn calls(&self) -> u32 {
        *self.calls.lock()
    }
}

impl CopySimulator for FixedCopy {
    fn simulate_copy(&self) -> Result<(), SelectionError> {
        *self.calls.lock() += 1;
        let text = self.selection.clone()?;
        *self.clipboard.text.lock() = text;
        Ok(())
    }
}

/// Returns a fixed data URI or error and counts calls.
pub struct FakeScreenshot {
    pub fail: bool,
    pub calls: Mutex<u32>,
}

pub const FAKE_DATA_URI: &str = "data:image/png;base64,iVBORw==";

impl FakeScreenshot {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            calls: Mutex::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            calls: Mutex::new(0),
        })
    }

    pub fn calls(&self) -> u32 {
        *self.calls.lock()
    }
}

impl ScreenshotCapture for FakeScreenshot {
    fn capture(&self) -> Result<String, ScreenshotError> {
        *self.calls.lock() += 1;
        if self.fail {
            Err(ScreenshotError::Cancelled)
        } else {
            Ok(FAKE_DATA_URI.to_string())
        }
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<UiEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: UiEvent) {
        self.events.lock().push(event);
    }
}

/// Everything a dispatcher test needs to inspect.
pub struct Harness {
    pub clipboard: Arc<MemoryClipboard>,
    pub copier: Arc<FixedCopy>,
    pub screenshots: Arc<FakeScreenshot>,
    pub sink: Arc<RecordingSink>,
    pub dispatcher: Arc<Dispatcher>,
}

pub struct HarnessBuilder {
    clipboard_text: String,
    selection: Result<String, String>,
    screenshot_fails: bool,
    restricted_network: bool,
    config: DispatchConfig,
}

impl Default for HarnessBuilder {
    fn default() -> Self {
        Self {
            clipboard_text: "previous clipboard".to_string(),
            selection: Ok("selected text".to_string()),
            screenshot_fails: false,
            restricted_network: false,
            config: DispatchConfig::default(),
        }
    }
}

impl HarnessBuilder {
    pub fn selection(mut self, text: &str) -> Self {
        self.selection = Ok(text.to_string());
        self
    }

    pub fn copy_fails(mut self, message: &str) -> Self {
        self.selection = Err(message.to_string());
        self
    }

    pub fn screenshot_fails(mut self) -> Self {
        self.screenshot_fails = true;
        self
    }

    pub fn restricted_network(mut self) -> Self {
        self.restricted_network = true;
        self
    }

    pub fn config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Harness {
        let clipboard = MemoryClipboard::with_text(&self.clipboard_text);
        let copier = match &self.selection {
            Ok(text) => FixedCopy::selecting(&clipboard, text),
            Err(message) => FixedCopy::failing(&clipboard, message),
        };
        let screenshots = if self.screenshot_fails {
            FakeScreenshot::failing()
        } else {
            FakeScreenshot::ok()
        };
        let sink = Arc::new(RecordingSink::default());

        let acquirer = SelectionAcquirer::new(
            clipboard.clone(),
            copier.clone(),
            SelectionConfig::immediate(),
        );
        let dispatcher = Arc::new(Dispatcher::new(
            acquirer,
            screenshots.clone(),
            Arc::new(StaticRegionProbe {
                restricted: self.restricted_network,
            }),
            sink.clone(),
            self.config,
        ));

        Harness {
            clipboard,
            copier,
            screenshots,
            sink,
            dispatcher,
        }
    }
}

pub fn harness() -> HarnessBuilder {
    HarnessBuilder::default()
}
