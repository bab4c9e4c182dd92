//! Delivery of [`UiEvent`]s to the UI layer.
//!
//! Emission is fire-and-forget: a sink logs its own delivery failures and
//! never reports them back to the dispatcher.

use std::io::Write;

use parking_lot::Mutex;
use tracing::debug;

use super::event::UiEvent;

pub trait EventSink: Send + Sync {
    fn emit(&self, event: UiEvent);
}

/// One JSON object per line on a writer, normally stdout.
pub struct JsonlSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonlSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl JsonlSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> EventSink for JsonlSink<W> {
    fn emit(&self, event: UiEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                debug!(event_type = event.name(), error = %e, "Failed to serialize event");
                return;
            }
        };

        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            debug!(event_type = event.name(), error = %e, "Failed to write event");
        }
    }
}

/// Forwards events into an `async_channel` for in-process consumers.
#[derive(Clone)]
pub struct ChannelSink {
    sender: async_channel::Sender<UiEvent>,
}

impl ChannelSink {
    /// Bounded channel; events are dropped while it is full.
    pub fn bounded(capacity: usize) -> (Self, async_channel::Receiver<UiEvent>) {
        let (sender, receiver) = async_channel::bounded(capacity);
        (Self { sender }, receiver)
    }

    pub fn from_sender(sender: async_channel::Sender<UiEvent>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: UiEvent) {
        let event_type = event.name();
        if let Err(e) = self.sender.try_send(event) {
            debug!(event_type, error = %e, "Event channel rejected event");
        }
    }
}
