use super::*;
use crate::platform::Platform;

fn tokens(combo: &str, platform: Platform) -> Vec<String> {
    NormalizedCombo::parse(combo, platform)
        .map(|c| c.tokens().to_vec())
        .unwrap_or_default()
}

#[test]
fn test_cmd_becomes_ctrl_off_macos() {
    assert_eq!(tokens("cmd+1", Platform::Windows), vec!["ctrl", "1"]);
    assert_eq!(tokens("cmd+1", Platform::Linux), vec!["ctrl", "1"]);
}

#[test]
fn test_cmd_kept_on_macos() {
    assert_eq!(tokens("cmd+1", Platform::MacOS), vec!["cmd", "1"]);
}

#[test]
fn test_trims_lowercases_and_drops_empty_pieces() {
    assert_eq!(
        tokens(" Cmd + Shift ++ K ", Platform::MacOS),
        vec!["cmd", "shift", "k"]
    );
}

#[test]
fn test_only_separators_yields_none() {
    assert!(NormalizedCombo::parse("+ + +", Platform::Windows).is_none());
    assert!(NormalizedCombo::parse("", Platform::MacOS).is_none());
}

#[test]
fn test_normalization_is_idempotent() {
    for platform in [Platform::MacOS, Platform::Windows, Platform::Linux] {
        for raw in ["cmd+shift+1", " CTRL + alt + F5", "Cmd++a"] {
            let once = NormalizedCombo::parse(raw, platform).unwrap();
            let twice = NormalizedCombo::parse(&once.to_combo_string(), platform).unwrap();
            assert_eq!(once, twice, "{raw} on {platform}");
        }
    }
}

#[test]
fn test_command_word_is_not_rewritten() {
    // Only the exact `cmd` token is rewritten
    assert_eq!(
        tokens("command+k", Platform::Windows),
        vec!["command", "k"]
    );
}

#[test]
fn test_display_joins_tokens() {
    let combo = NormalizedCombo::parse("Cmd+Shift+K", Platform::Windows).unwrap();
    assert_eq!(combo.to_string(), "ctrl+shift+k");
    assert_eq!(combo.len(), 3);
}

#[test]
fn test_definition_wire_names() {
    let json = r#"{"label":"Translate","value":"Translate to English","shortcut":"cmd+2"}"#;
    let def: ShortcutDefinition = serde_json::from_str(json).unwrap();
    assert_eq!(
        def,
        ShortcutDefinition::new("Translate", "Translate to English", "cmd+2")
    );

    let back = serde_json::to_value(&def).unwrap();
    assert_eq!(back["value"], "Translate to English");
    assert_eq!(back["shortcut"], "cmd+2");
}

#[test]
fn test_definition_missing_fields_default_to_empty() {
    let def: ShortcutDefinition = serde_json::from_str(r#"{"label":"Only label"}"#).unwrap();
    assert_eq!(def.action, "");
    assert_eq!(def.combo, "");
}

#[test]
fn test_key_records_skip_consecutive_duplicates_and_cap() {
    let mut history = KeyRecordHistory::new();
    assert!(history.add("a"));
    assert!(!history.add("a"));
    history.add("b");
    history.add("c");
    history.add("d");
    assert_eq!(history.records(), vec!["b", "c", "d"]);
    assert_eq!(history.len(), KEY_RECORD_CAPACITY);
}

#[test]
fn test_key_records_allow_non_consecutive_repeat() {
    let mut history = KeyRecordHistory::new();
    history.add("a");
    history.add("b");
    assert!(history.add("a"));
    assert_eq!(history.records(), vec!["a", "b", "a"]);
}
