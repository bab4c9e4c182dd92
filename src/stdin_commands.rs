//! External command handling via stdin.
//!
//! The UI process drives the engine with JSON objects, one per line (JSONL):
//!
//! ```json
//! {"type": "setShortcutList", "payload": "[{\"label\":\"Ask\",\"value\":\"Ask AI\",\"shortcut\":\"cmd+1\"}]"}
//! {"type": "registerKeyboardShortcut"}
//! {"type": "syncShortcutList", "payload": "[...]"}
//! {"type": "shutdown"}
//! ```
//!
//! `payload` is the shortcut list as a JSON *string*, exactly as the UI
//! serializes it.

use std::io::BufRead;

use tracing::{debug, info, warn};

/// Commands accepted on stdin.
///
/// All commands support an optional `requestId` field for correlation in logs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExternalCommand {
    /// Replace the shortcut list
    SetShortcutList {
        payload: String,
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// Re-arm the hook set from the current list
    RegisterKeyboardShortcut {
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// Replace the list, then re-arm
    SyncShortcutList {
        payload: String,
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
    },
    /// Tear down hooks and exit
    Shutdown,
}

impl ExternalCommand {
    pub fn request_id(&self) -> Option<&str> {
        match self {
            ExternalCommand::SetShortcutList { request_id, .. }
            | ExternalCommand::RegisterKeyboardShortcut { request_id }
            | ExternalCommand::SyncShortcutList { request_id, .. } => request_id.as_deref(),
            ExternalCommand::Shutdown => None,
        }
    }
}

/// Parse one input line. Blank lines yield `None`; bad JSON is logged and
/// yields `None`.
pub fn parse_command_line(line: &str) -> Option<ExternalCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<ExternalCommand>(line) {
        Ok(cmd) => {
            debug!(command = ?cmd, "Parsed command");
            Some(cmd)
        }
        Err(e) => {
            warn!(error = %e, line, "Failed to parse command");
            None
        }
    }
}

/// Read commands from `reader` until EOF, a read error, or a closed channel.
pub fn pump_commands<R: BufRead>(reader: R, tx: &async_channel::Sender<ExternalCommand>) {
    for line in reader.lines() {
        match line {
            Ok(line) => {
                let Some(cmd) = parse_command_line(&line) else {
                    continue;
                };
                // send_blocking is used since we're in a sync thread
                if tx.send_blocking(cmd).is_err() {
                    info!("Command channel closed, exiting");
                    break;
                }
            }
            Err(e) => {
                warn!(error = %e, "Error reading stdin");
                break;
            }
        }
    }
}

/// Start a thread that listens on stdin for external JSONL commands.
///
/// Uses a bounded channel with capacity of 100; the UI sends a handful of
/// commands per session. The channel closes when stdin reaches EOF.
pub fn start_stdin_listener() -> async_channel::Receiver<ExternalCommand> {
    let (tx, rx) = async_channel::bounded(100);

    std::thread::spawn(move || {
        info!("External command listener started");
        let stdin = std::io::stdin();
        pump_commands(stdin.lock(), &tx);
        info!("External command listener exiting");
    });

    rx
}

// ============================================================================
// Tests
// ============================================================================
