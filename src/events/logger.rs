//! Gated event logging.
//!
//! For each event: look up its category, ask the gate, and only then format
//! the line and hand it to the sink. Suppressed events are never formatted.

use std::sync::Arc;

use crate::events::event::NodeEvent;
use crate::events::sink::LogSink;
use crate::gate::LogGate;
use crate::observability::metrics;

/// Connects an event source to a sink through a [`LogGate`].
#[derive(Clone)]
pub struct EventLogger {
    gate: Arc<LogGate>,
    sink: Arc<dyn LogSink>,
}

impl EventLogger {
    pub fn new(gate: Arc<LogGate>, sink: Arc<dyn LogSink>) -> Self {
        Self { gate, sink }
    }

    pub fn gate(&self) -> &Arc<LogGate> {
        &self.gate
    }

    /// Log `event` if its category is enabled. Returns whether a line was emitted.
    pub fn observe(&self, event: &NodeEvent) -> bool {
        let category = event.category();
        let emitted = self.gate.enabled(category.segments);
        if emitted {
            self.sink
                .emit(event.level(), category.name, &event.to_string());
        }
        metrics::record_event(emitted);
        emitted
    }

    /// Log a batch of events, returning how many lines were emitted.
    pub fn observe_all<'a, I>(&self, events: I) -> usize
    where
        I: IntoIterator<Item = &'a NodeEvent>,
    {
        events.into_iter().filter(|e| self.observe(e)).count()
    }
}
