//! Per-shortcut debounce.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Last fire time per combo key. Entries are overwritten, never removed.
#[derive(Clone, Debug, Default)]
pub struct CooldownTable {
    last_fired: HashMap<String, Instant>,
}

impl CooldownTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fire of `key` at `now` unless it fired less than `window` ago.
    ///
    /// Returns `true` when the fire is accepted.
    pub fn try_fire(&mut self, key: &str, now: Instant, window: Duration) -> bool {
        if let Some(last) = self.last_fired.get(key) {
            if now.saturating_duration_since(*last) < window {
                return false;
            }
        }
        self.last_fired.insert(key.to_string(), now);
        true
    }

    pub fn last_fired(&self, key: &str) -> Option<Instant> {
        self.last_fired.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.last_fired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_fired.is_empty()
    }
}
