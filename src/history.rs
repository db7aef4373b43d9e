//! Command history tracking for debugging and diagnostics.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::plan::Dispatch;

/// How a recorded command reached the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    Single,
    Batch,
}

/// A single property write inside a recorded command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedWrite {
    pub property: String,
    pub value: Value,
}

/// A recorded command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub kind: CommandKind,
    pub writes: Vec<RecordedWrite>,
    /// Seconds since history creation
    pub timestamp: f64,
}

/// Tracks the commands a light sent to its device.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    single_count: usize,
    batch_count: usize,
    last_error: Option<String>,
    start_time: Instant,
    entries: Vec<HistoryEntry>,
    max_entries: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHistory {
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    pub fn new() -> Self {
        Self {
            single_count: 0,
            batch_count: 0,
            last_error: None,
            start_time: Instant::now(),
            entries: Vec::new(),
            max_entries: Self::DEFAULT_MAX_ENTRIES,
        }
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Self::new()
        }
    }

    pub fn record(&mut self, dispatch: &Dispatch) {
        let kind = match dispatch {
            Dispatch::Single(_) => {
                self.single_count += 1;
                CommandKind::Single
            }
            Dispatch::Batch(_) => {
                self.batch_count += 1;
                CommandKind::Batch
            }
        };

        self.entries.push(HistoryEntry {
            kind,
            writes: dispatch
                .writes()
                .iter()
                .map(|w| RecordedWrite {
                    property: w.prop.label(),
                    value: w.value.clone(),
                })
                .collect(),
            timestamp: self.start_time.elapsed().as_secs_f64(),
        });

        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    pub fn record_error(&mut self, error: &str) {
        self.last_error = Some(error.to_string());
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.single_count = 0;
        self.batch_count = 0;
        self.entries.clear();
        self.last_error = None;
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            single_count: self.single_count,
            batch_count: self.batch_count,
            total_entries: self.entries.len(),
            last_error: self.last_error.clone(),
        }
    }
}

/// Summary of command history for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    pub single_count: usize,
    pub batch_count: usize,
    pub total_entries: usize,
    pub last_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{MiotProperty, PropertyWrite, ValueFormat};
    use serde_json::json;

    fn on_write(value: bool) -> PropertyWrite {
        PropertyWrite::new(&MiotProperty::new(2, 1, "on", ValueFormat::Bool), json!(value))
    }

    #[test]
    fn test_record_dispatch() {
        let mut history = CommandHistory::new();
        history.record(&Dispatch::Batch(vec![on_write(true), on_write(false)]));
        history.record(&Dispatch::Single(on_write(true)));

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].kind, CommandKind::Batch);
        assert_eq!(history.entries()[0].writes[0].property, "on(2.1)");
        let summary = history.summary();
        assert_eq!(summary.batch_count, 1);
        assert_eq!(summary.single_count, 1);
    }

    #[test]
    fn test_record_error() {
        let mut history = CommandHistory::new();
        history.record_error("device offline");
        assert_eq!(history.last_error(), Some("device offline"));
        history.clear();
        assert!(history.last_error().is_none());
    }

    #[test]
    fn test_max_entries() {
        let mut history = CommandHistory::with_max_entries(2);
        for _ in 0..5 {
            history.record(&Dispatch::Single(on_write(true)));
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.summary().single_count, 5);
    }
}
