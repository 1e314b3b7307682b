//! Hierarchical log gate.
//!
//! # Data Flow
//! ```text
//! ConfigTree (operator supplied)
//!     → table.rs (flatten, parse truthy values)
//!     → GateTable (immutable)
//!     → evaluator.rs (atomic swap into LogGate)
//!
//! Per event:
//!     category segments → LogGate::enabled → emit or skip
//! ```
//!
//! # Design Decisions
//! - Enabled unless explicitly disabled
//! - A disabled ancestor disables every descendant
//! - Evaluation is infallible and lock-free

pub mod evaluator;
pub mod hash;
pub mod report;
pub mod table;
pub mod tree;

pub use evaluator::LogGate;
pub use table::{parse_bool, GateTable};
pub use tree::ConfigTree;
