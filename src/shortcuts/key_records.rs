//! Short history of recently triggered shortcuts.
//!
//! Consecutive repeats collapse into one record, and only the newest
//! `KEY_RECORD_CAPACITY` entries are kept, oldest first.

use std::collections::VecDeque;

/// Number of records retained.
pub const KEY_RECORD_CAPACITY: usize = 3;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyRecordHistory {
    records: VecDeque<String>,
}

impl KeyRecordHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` unless it repeats the newest entry.
    ///
    /// Returns `false` when the record was a consecutive duplicate.
    pub fn add(&mut self, record: impl Into<String>) -> bool {
        let record = record.into();
        if self.records.back() == Some(&record) {
            return false;
        }
        self.records.push_back(record);
        while self.records.len() > KEY_RECORD_CAPACITY {
            self.records.pop_front();
        }
        true
    }

    /// Records, oldest first.
    pub fn records(&self) -> Vec<String> {
        self.records.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
