//! Trigger dispatch: debounce, routing and delivery to the UI.

mod cooldown;
mod dispatcher;
mod event;
mod router;
mod sink;

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod dispatcher_tests;

pub use cooldown::CooldownTable;
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use event::{SelectionPayload, UiEvent, OCR_BLOCKED_MESSAGE, OCR_BLOCKED_TITLE};
pub use router::ActionKind;
pub use sink::{ChannelSink, EventSink, JsonlSink};
