//! Per-trigger state machine.
//!
//! Every hook callback lands in [`Dispatcher::handle_trigger`]:
//! cooldown check, action classification, then one of the open-window,
//! screenshot or selection branches, ending in at most one emitted event.
//! Failures inside a branch are logged and the trigger is dropped silently.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{info, instrument, warn};

use super::cooldown::CooldownTable;
use super::event::{SelectionPayload, UiEvent};
use super::router::ActionKind;
use super::sink::EventSink;
use crate::config::DispatchConfig;
use crate::network::RegionProbe;
use crate::screenshot::ScreenshotCapture;
use crate::selection::SelectionAcquirer;
use crate::shortcuts::{KeyRecordHistory, RegisteredShortcut};

/// What happened to one trigger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Same shortcut fired within the cooldown window
    CoolingDown,
    /// `GET_SELECTION` was emitted with this payload
    Emitted(SelectionPayload),
    /// OCR refused on a restricted network; an error dialog was emitted
    OcrBlocked,
    /// Capture or acquisition failed; nothing was emitted
    Dropped(String),
}

#[derive(Debug, Default)]
struct DispatchState {
    cooldowns: CooldownTable,
    key_records: KeyRecordHistory,
}

pub struct Dispatcher {
    state: Mutex<DispatchState>,
    selection: SelectionAcquirer,
    screenshots: Arc<dyn ScreenshotCapture>,
    region_probe: Arc<dyn RegionProbe>,
    sink: Arc<dyn EventSink>,
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(
        selection: SelectionAcquirer,
        screenshots: Arc<dyn ScreenshotCapture>,
        region_probe: Arc<dyn RegionProbe>,
        sink: Arc<dyn EventSink>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            state: Mutex::new(DispatchState::default()),
            selection,
            screenshots,
            region_probe,
            sink,
            config,
        }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Most recent distinct combo keys that fired, oldest first.
    pub fn recent_keys(&self) -> Vec<String> {
        self.state.lock().key_records.records()
    }

    /// Emit an event outside the trigger path (registration errors).
    pub fn emit(&self, event: UiEvent) {
        self.sink.emit(event);
    }

    pub fn handle_trigger(&self, shortcut: &RegisteredShortcut) -> DispatchOutcome {
        self.handle_trigger_at(shortcut, Instant::now())
    }

    #[instrument(skip_all, fields(shortcut = %shortcut.combo_key, action = %shortcut.action))]
    pub fn handle_trigger_at(&self, shortcut: &RegisteredShortcut, now: Instant) -> DispatchOutcome {
        {
            let mut state = self.state.lock();
            state.key_records.add(shortcut.combo_key.as_str());
            if !state
                .cooldowns
                .try_fire(&shortcut.combo_key, now, self.config.cooldown())
            {
                info!("Shortcut triggered too frequently, skipping");
                return DispatchOutcome::CoolingDown;
            }
        }

        let kind = ActionKind::classify(&shortcut.action, &self.config);
        info!(kind = kind.as_str(), "Shortcut triggered");

        let text = match kind {
            ActionKind::OpenWindow => String::new(),
            ActionKind::Ocr => {
                if self.config.check_ocr_region && self.region_probe.is_restricted_network() {
                    warn!("OCR unavailable on this network");
                    self.sink.emit(UiEvent::ocr_region_blocked());
                    return DispatchOutcome::OcrBlocked;
                }
                match self.screenshots.capture() {
                    Ok(data_uri) => data_uri,
                    Err(e) => {
                        warn!(error = %e, "Screenshot failed, dropping trigger");
                        return DispatchOutcome::Dropped(e.to_string());
                    }
                }
            }
            ActionKind::Ask => match self.selection.acquire_with_retries() {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "Error getting selection after retries");
                    return DispatchOutcome::Dropped(e.to_string());
                }
            },
        };

        let payload =
            SelectionPayload::for_kind(kind, shortcut.combo_key.as_str(), shortcut.action.as_str(), text);
        info!(
            event_type = "GET_SELECTION",
            text_len = payload.text.len(),
            "Emitting selection"
        );
        self.sink.emit(UiEvent::GetSelection(payload.clone()));
        DispatchOutcome::Emitted(payload)
    }
}
