//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gate and config subsystems produce:
//!     → logging.rs (tracing subscriber setup)
//!     → metrics.rs (event / reload counters, table size)
//! ```

pub mod logging;
pub mod metrics;
