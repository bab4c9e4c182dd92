//! Notifications sent to the UI layer.
//!
//! Serialized as `{"event": NAME, "payload": {...}}`.

use serde::{Deserialize, Serialize};

use super::router::ActionKind;

pub const OCR_BLOCKED_TITLE: &str = "OCR failed";
pub const OCR_BLOCKED_MESSAGE: &str = "OCR failed: some countries network are not supported";

/// Payload of `GET_SELECTION`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionPayload {
    /// Selected text, a PNG data URI for OCR, or empty
    pub text: String,
    /// Original combo string of the shortcut that fired
    pub shortcut: String,
    /// The shortcut's action value
    pub prompt: String,
    pub auto_asking: bool,
    #[serde(rename = "isOCR")]
    pub is_ocr: bool,
    pub is_open_window: bool,
}

impl SelectionPayload {
    pub fn new(
        shortcut: impl Into<String>,
        action: impl Into<String>,
        text: impl Into<String>,
        auto_asking: bool,
        is_ocr: bool,
        is_open_window: bool,
    ) -> Self {
        Self {
            text: text.into(),
            shortcut: shortcut.into(),
            prompt: action.into(),
            auto_asking,
            is_ocr,
            is_open_window,
        }
    }

    /// Build the payload for a dispatch of `kind`.
    pub fn for_kind(
        kind: ActionKind,
        shortcut: impl Into<String>,
        action: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(
            shortcut,
            action,
            text,
            kind.auto_asking(),
            kind == ActionKind::Ocr,
            kind == ActionKind::OpenWindow,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")]
pub enum UiEvent {
    #[serde(rename = "GET_SELECTION")]
    GetSelection(SelectionPayload),
    /// Blocking error dialog
    #[serde(rename = "ERROR_DIALOG")]
    ErrorDialog { title: String, message: String },
    /// Non-blocking error for the UI to display
    #[serde(rename = "ERROR")]
    Error { message: String },
}

impl UiEvent {
    pub fn ocr_region_blocked() -> Self {
        UiEvent::ErrorDialog {
            title: OCR_BLOCKED_TITLE.to_string(),
            message: OCR_BLOCKED_MESSAGE.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        UiEvent::Error {
            message: message.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::GetSelection(_) => "GET_SELECTION",
            UiEvent::ErrorDialog { .. } => "ERROR_DIALOG",
            UiEvent::Error { .. } => "ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_selection_wire_format() {
        let event = UiEvent::GetSelection(SelectionPayload::for_kind(
            ActionKind::Ask,
            "cmd+1",
            "Ask AI",
            "hello",
        ));
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "event": "GET_SELECTION",
                "payload": {
                    "text": "hello",
                    "shortcut": "cmd+1",
                    "prompt": "Ask AI",
                    "autoAsking": true,
                    "isOCR": false,
                    "isOpenWindow": false
                }
            })
        );
    }

    #[test]
    fn test_payload_flags_per_kind() {
        let ocr = SelectionPayload::for_kind(ActionKind::Ocr, "cmd+3", "OCR", "data:image/png;base64,AA");
        assert!(ocr.is_ocr);
        assert!(!ocr.auto_asking);
        assert!(!ocr.is_open_window);

        let open = SelectionPayload::for_kind(ActionKind::OpenWindow, "cmd+0", "Open Window", "");
        assert!(open.is_open_window);
        assert!(!open.auto_asking);
        assert!(!open.is_ocr);
        assert_eq!(open.text, "");
    }

    #[test]
    fn test_error_dialog_wire_format() {
        assert_eq!(
            serde_json::to_value(UiEvent::ocr_region_blocked()).unwrap(),
            json!({
                "event": "ERROR_DIALOG",
                "payload": {
                    "title": "OCR failed",
                    "message": "OCR failed: some countries network are not supported"
                }
            })
        );
    }

    #[test]
    fn test_error_event_round_trip() {
        let event = UiEvent::error("bad list");
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"event":"ERROR","payload":{"message":"bad list"}}"#);
        let back: UiEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
        assert_eq!(back.name(), "ERROR");
    }
}
