use std::time::{Duration, Instant};

use super::*;
use crate::config::DispatchConfig;
use crate::platform::Platform;
use crate::shortcuts::{NormalizedCombo, RegisteredShortcut};
use crate::test_support::{harness, FAKE_DATA_URI};

fn shortcut(combo: &str, action: &str) -> RegisteredShortcut {
    RegisteredShortcut {
        combo_key: combo.to_string(),
        hook_keys: NormalizedCombo::parse(combo, Platform::Windows).unwrap(),
        action: action.to_string(),
        label: action.to_string(),
    }
}

#[test]
fn test_ask_emits_selection_and_restores_clipboard() {
    let h = harness().selection("  highlighted words ").build();

    let outcome = h.dispatcher.handle_trigger(&shortcut("cmd+1", "Ask AI"));

    let expected = SelectionPayload::new("cmd+1", "Ask AI", "highlighted words", true, false, false);
    assert_eq!(outcome, DispatchOutcome::Emitted(expected.clone()));
    assert_eq!(h.sink.events(), vec![UiEvent::GetSelection(expected)]);
    assert_eq!(h.clipboard.text(), "previous clipboard");
}

#[test]
fn test_ask_with_empty_selection_still_emits() {
    let h = harness().selection("").build();

    let outcome = h.dispatcher.handle_trigger(&shortcut("cmd+1", "Ask AI"));

    match outcome {
        DispatchOutcome::Emitted(payload) => {
            assert_eq!(payload.text, "");
            assert!(payload.auto_asking);
        }
        other => panic!("expected emission, got {:?}", other),
    }
    assert_eq!(h.copier.calls(), 3);
}

#[test]
fn test_ask_failure_drops_silently() {
    let h = harness().copy_fails("no permission").build();

    let outcome = h.dispatcher.handle_trigger(&shortcut("cmd+1", "Ask AI"));

    assert!(matches!(outcome, DispatchOutcome::Dropped(ref msg) if msg.contains("no permission")));
    assert!(h.sink.events().is_empty());
    assert_eq!(h.copier.calls(), 3);
    assert_eq!(h.clipboard.text(), "previous clipboard");
}

#[test]
fn test_open_window_emits_empty_text_without_touching_clipboard() {
    let h = harness().build();

    let outcome = h.dispatcher.handle_trigger(&shortcut("cmd+0", "Open Window"));

    let expected = SelectionPayload::new("cmd+0", "Open Window", "", false, false, true);
    assert_eq!(outcome, DispatchOutcome::Emitted(expected));
    assert_eq!(h.copier.calls(), 0);
    assert_eq!(h.screenshots.calls(), 0);
}

#[test]
fn test_ocr_emits_data_uri() {
    for action in ["OCR", "ORC"] {
        let h = harness().build();

        let outcome = h.dispatcher.handle_trigger(&shortcut("cmd+3", action));

        let expected = SelectionPayload::new("cmd+3", action, FAKE_DATA_URI, false, true, false);
        assert_eq!(outcome, DispatchOutcome::Emitted(expected));
        assert_eq!(h.copier.calls(), 0);
    }
}

#[test]
fn test_ocr_failure_drops_without_retry() {
    let h = harness().screenshot_fails().build();

    let outcome = h.dispatcher.handle_trigger(&shortcut("cmd+3", "OCR"));

    assert!(matches!(outcome, DispatchOutcome::Dropped(_)));
    assert_eq!(h.screenshots.calls(), 1);
    assert!(h.sink.events().is_empty());
}

#[test]
fn test_ocr_blocked_on_restricted_network() {
    let h = harness().restricted_network().build();

    let outcome = h.dispatcher.handle_trigger(&shortcut("cmd+3", "OCR"));

    assert_eq!(outcome, DispatchOutcome::OcrBlocked);
    assert_eq!(h.sink.events(), vec![UiEvent::ocr_region_blocked()]);
    assert_eq!(h.screenshots.calls(), 0);
}

#[test]
fn test_region_check_can_be_disabled() {
    let h = harness()
        .restricted_network()
        .config(DispatchConfig {
            check_ocr_region: false,
            ..DispatchConfig::default()
        })
        .build();

    let outcome = h.dispatcher.handle_trigger(&shortcut("cmd+3", "OCR"));

    assert!(matches!(outcome, DispatchOutcome::Emitted(_)));
    assert_eq!(h.screenshots.calls(), 1);
}

#[test]
fn test_cooldown_blocks_repeat_within_window() {
    let h = harness().build();
    let ask = shortcut("cmd+1", "Ask AI");
    let start = Instant::now();

    assert!(matches!(
        h.dispatcher.handle_trigger_at(&ask, start),
        DispatchOutcome::Emitted(_)
    ));
    assert_eq!(
        h.dispatcher
            .handle_trigger_at(&ask, start + Duration::from_millis(2500)),
        DispatchOutcome::CoolingDown
    );
    assert!(matches!(
        h.dispatcher.handle_trigger_at(&ask, start + Duration::from_secs(3)),
        DispatchOutcome::Emitted(_)
    ));
    assert_eq!(h.sink.events().len(), 2);
}

#[test]
fn test_cooldown_is_per_shortcut() {
    let h = harness().build();
    let now = Instant::now();

    assert!(matches!(
        h.dispatcher.handle_trigger_at(&shortcut("cmd+1", "Ask AI"), now),
        DispatchOutcome::Emitted(_)
    ));
    assert!(matches!(
        h.dispatcher
            .handle_trigger_at(&shortcut("cmd+0", "Open Window"), now),
        DispatchOutcome::Emitted(_)
    ));
}

#[test]
fn test_failed_dispatch_still_starts_cooldown() {
    let h = harness().screenshot_fails().build();
    let ocr = shortcut("cmd+3", "OCR");
    let now = Instant::now();

    h.dispatcher.handle_trigger_at(&ocr, now);
    assert_eq!(
        h.dispatcher
            .handle_trigger_at(&ocr, now + Duration::from_secs(1)),
        DispatchOutcome::CoolingDown
    );
}

#[test]
fn test_recent_keys_recorded_before_cooldown() {
    let h = harness().build();
    let now = Instant::now();

    h.dispatcher.handle_trigger_at(&shortcut("cmd+1", "Ask AI"), now);
    h.dispatcher.handle_trigger_at(&shortcut("cmd+1", "Ask AI"), now);
    h.dispatcher.handle_trigger_at(&shortcut("cmd+2", "Ask AI"), now);
    h.dispatcher.handle_trigger_at(&shortcut("cmd+3", "OCR"), now);
    h.dispatcher.handle_trigger_at(&shortcut("cmd+0", "Open Window"), now);

    assert_eq!(h.dispatcher.recent_keys(), vec!["cmd+2", "cmd+3", "cmd+0"]);
}
