//! Gate evaluation over the live table.
//!
//! # Semantics
//! ```text
//! []                 → enabled
//! ["a"]              → table["a"] or enabled
//! ["a", "b", "c"]    → test("a") && test("a.b") && test("a.b.c")
//!                      (stops at the first disabled ancestor)
//! ```
//!
//! # Concurrency
//! The table sits behind an `ArcSwap`. `configure` builds a complete table
//! first and publishes it with one atomic store; every evaluation loads a
//! single snapshot, so it never sees entries from two different loads.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::gate::table::GateTable;
use crate::gate::tree::ConfigTree;
use crate::observability::metrics;

/// Hierarchical log gate shared by all event call sites.
#[derive(Debug)]
pub struct LogGate {
    table: ArcSwap<GateTable>,
}

impl LogGate {
    /// A gate with an empty table: everything enabled.
    pub fn new() -> Self {
        Self::with_table(GateTable::new())
    }

    pub fn with_table(table: GateTable) -> Self {
        metrics::record_table_entries(table.len());
        Self {
            table: ArcSwap::from_pointee(table),
        }
    }

    pub fn from_tree(tree: &ConfigTree) -> Self {
        Self::with_table(GateTable::from_tree(tree))
    }

    /// Replace the live table with one built from `tree`.
    pub fn configure(&self, tree: &ConfigTree) {
        self.replace(GateTable::from_tree(tree));
    }

    /// Publish a prebuilt table.
    pub fn replace(&self, table: GateTable) {
        let entries = table.len();
        self.table.store(Arc::new(table));
        metrics::record_table_entries(entries);
        tracing::debug!(entries, "Gate table replaced");
    }

    /// Current table snapshot.
    pub fn snapshot(&self) -> Arc<GateTable> {
        self.table.load_full()
    }

    /// Whether events in the category given by `path` segments are enabled.
    pub fn enabled(&self, path: &[&str]) -> bool {
        let table = self.table.load();
        match path {
            [] => true,
            [single] => table.test(single),
            [first, rest @ ..] => {
                if !table.test(first) {
                    return false;
                }
                let capacity = path.iter().map(|s| s.len() + 1).sum();
                let mut prefix = String::with_capacity(capacity);
                prefix.push_str(first);
                for segment in rest {
                    prefix.push('.');
                    prefix.push_str(segment);
                    if !table.test(&prefix) {
                        return false;
                    }
                }
                true
            }
        }
    }

    /// Direct lookup of an already-joined path; no ancestor walk.
    pub fn enabled_key(&self, key: &str) -> bool {
        self.table.load().test(key)
    }

    /// Evaluate a dotted category as if split on `.` into segments.
    pub fn enabled_dotted(&self, category: &str) -> bool {
        if category.is_empty() {
            return true;
        }
        let table = self.table.load();
        for (idx, _) in category.match_indices('.') {
            if !table.test(&category[..idx]) {
                return false;
            }
        }
        table.test(category)
    }
}

impl Default for LogGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use ::metrics::{
        Counter, Gauge, GaugeFn, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };

    /// Remembers the last value written to any gauge.
    #[derive(Default)]
    struct LastGauge(Mutex<Option<f64>>);

    impl GaugeFn for LastGauge {
        fn increment(&self, value: f64) {
            let mut last = self.0.lock().unwrap();
            *last = Some(last.unwrap_or(0.0) + value);
        }

        fn decrement(&self, value: f64) {
            let mut last = self.0.lock().unwrap();
            *last = Some(last.unwrap_or(0.0) - value);
        }

        fn set(&self, value: f64) {
            *self.0.lock().unwrap() = Some(value);
        }
    }

    #[derive(Default)]
    struct GaugeRecorder {
        gauge: Arc<LastGauge>,
    }

    impl Recorder for GaugeRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, _: &Key, _: &Metadata<'_>) -> Counter {
            Counter::noop()
        }

        fn register_gauge(&self, key: &Key, _: &Metadata<'_>) -> Gauge {
            assert_eq!(key.name(), "log_gate_table_entries");
            Gauge::from_arc(self.gauge.clone())
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    fn gate(json: &str) -> LogGate {
        LogGate::from_tree(&ConfigTree::from_json_str(json).unwrap())
    }

    #[test]
    fn test_empty_table_enables_everything() {
        let gate = LogGate::new();
        assert!(gate.enabled(&[]));
        assert!(gate.enabled(&["start"]));
        assert!(gate.enabled(&["connector", "session", "new"]));
        assert!(gate.enabled_dotted("link.remote.closed"));
    }

    #[test]
    fn test_leaf_override() {
        let gate = gate(r#"{"a": {"b": "false", "c": "true"}}"#);
        assert!(!gate.enabled(&["a", "b"]));
        assert!(gate.enabled(&["a", "c"]));
        assert!(!gate.enabled(&["a", "b", "d"]));
        assert!(gate.enabled(&["a", "e"]));
    }

    #[test]
    fn test_ancestor_suppression() {
        let gate = gate(r#"{"a": "false"}"#);
        assert!(!gate.enabled(&["a"]));
        assert!(!gate.enabled(&["a", "anything", "deep", "path"]));
        assert!(gate.enabled(&["b", "anything"]));
    }

    #[test]
    fn test_descendant_cannot_reenable() {
        let gate = gate(r#"{"connector": {"session": {"new": "on"}}}"#);
        assert!(gate.enabled(&["connector", "session", "new"]));

        gate.replace(
            [
                ("connector".to_string(), false),
                ("connector.session.new".to_string(), true),
            ]
            .into_iter()
            .collect(),
        );
        assert!(!gate.enabled(&["connector", "session", "new"]));
    }

    #[test]
    fn test_enabled_key_skips_ancestors() {
        let gate = gate(r#"{"a": "false"}"#);
        assert!(gate.enabled_key("a.b"));
        assert!(!gate.enabled_key("a"));
    }

    #[test]
    fn test_dotted_matches_segments() {
        let gate = gate(r#"{"link": {"remote": {"closed": "off"}, "local": "0"}}"#);
        for path in [
            vec!["link", "remote", "closed"],
            vec!["link", "remote", "failed"],
            vec!["link", "local", "id"],
            vec!["link"],
        ] {
            assert_eq!(gate.enabled(&path), gate.enabled_dotted(&path.join(".")));
        }
        assert!(gate.enabled_dotted(""));
    }

    #[test]
    fn test_configure_replaces_wholesale() {
        let gate = gate(r#"{"a": "false", "b": "false"}"#);
        gate.configure(&ConfigTree::from_json_str(r#"{"b": "true"}"#).unwrap());
        assert!(gate.enabled(&["a"]));
        assert!(gate.enabled(&["b"]));
        assert_eq!(gate.snapshot().len(), 1);
    }

    #[test]
    fn test_initial_table_size_is_reported() {
        let recorder = GaugeRecorder::default();
        ::metrics::with_local_recorder(&recorder, || {
            gate(r#"{"a": {"b": "off"}, "c": "on"}"#);
        });
        assert_eq!(*recorder.gauge.0.lock().unwrap(), Some(3.0));

        ::metrics::with_local_recorder(&recorder, || {
            LogGate::new().configure(&ConfigTree::new().with_leaf("x", "0"));
        });
        assert_eq!(*recorder.gauge.0.lock().unwrap(), Some(1.0));
    }
}
