//! Destinations for formatted event lines.

use std::sync::{Mutex, PoisonError};

use tracing::Level;

/// Accepts one formatted line per emitted event.
///
/// Implementations may block; the gate is never held while `emit` runs.
pub trait LogSink: Send + Sync {
    fn emit(&self, level: Level, category: &str, message: &str);
}

/// Forwards lines to `tracing`, with the category as a structured field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, level: Level, category: &str, message: &str) {
        match level {
            Level::ERROR => tracing::error!(target: "log_gate::events", category, "{message}"),
            Level::WARN => tracing::warn!(target: "log_gate::events", category, "{message}"),
            Level::INFO => tracing::info!(target: "log_gate::events", category, "{message}"),
            Level::DEBUG => tracing::debug!(target: "log_gate::events", category, "{message}"),
            _ => tracing::trace!(target: "log_gate::events", category, "{message}"),
        }
    }
}

/// A line captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: Level,
    pub category: String,
    pub message: String,
}

/// Keeps every emitted line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything emitted so far.
    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Just the messages, in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogSink for MemorySink {
    fn emit(&self, level: Level, category: &str, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Record {
                level,
                category: category.to_string(),
                message: message.to_string(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.emit(Level::INFO, "start", "start");
        sink.emit(Level::WARN, "link.local.id", "local link id obtaining cancelled");

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].level, Level::WARN);
        assert_eq!(records[1].category, "link.local.id");
        assert_eq!(sink.messages(), vec!["start", "local link id obtaining cancelled"]);

        sink.clear();
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_tracing_sink_without_subscriber() {
        TracingSink.emit(Level::INFO, "stop", "stop");
    }
}
