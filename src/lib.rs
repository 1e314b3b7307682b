//! Hierarchical log gate for node lifecycle events.

pub mod config;
pub mod events;
pub mod gate;
pub mod observability;

pub use config::GateConfig;
pub use events::{EventLogger, NodeEvent};
pub use gate::{ConfigTree, GateTable, LogGate};
