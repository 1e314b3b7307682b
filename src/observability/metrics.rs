//! Metrics collection.
//!
//! # Metrics
//! - `log_gate_events_total` (counter): events seen, by outcome (emitted, suppressed)
//! - `log_gate_reloads_total` (counter): configuration reloads, by result
//! - `log_gate_table_entries` (gauge): entries in the live gate table
//!
//! # Design Decisions
//! - Uses the `metrics` facade; no exporter is installed here, so updates
//!   are no-ops unless the host process installs a recorder

use metrics::{counter, gauge};

/// Record an observed event and whether it passed the gate.
pub fn record_event(emitted: bool) {
    let outcome = if emitted { "emitted" } else { "suppressed" };
    counter!("log_gate_events_total", "outcome" => outcome).increment(1);
}

/// Record a configuration reload attempt.
pub fn record_reload(success: bool) {
    let result = if success { "ok" } else { "error" };
    counter!("log_gate_reloads_total", "result" => result).increment(1);
}

/// Record the size of the live gate table.
pub fn record_table_entries(entries: usize) {
    gauge!("log_gate_table_entries").set(entries as f64);
}
