//! Classification of a shortcut's action value.

use crate::config::DispatchConfig;

/// What a trigger does, decided by exact match on the action value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Bring up the main window with no text
    OpenWindow,
    /// Capture a screenshot for OCR
    Ocr,
    /// Read the selection and ask the model with it
    Ask,
}

impl ActionKind {
    pub fn classify(action: &str, config: &DispatchConfig) -> Self {
        if action == config.open_window_action {
            ActionKind::OpenWindow
        } else if config.ocr_actions.iter().any(|ocr| ocr == action) {
            ActionKind::Ocr
        } else {
            ActionKind::Ask
        }
    }

    /// Whether the UI should submit the prompt immediately.
    pub fn auto_asking(&self) -> bool {
        matches!(self, ActionKind::Ask)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::OpenWindow => "open_window",
            ActionKind::Ocr => "ocr",
            ActionKind::Ask => "ask",
        }
    }
}
