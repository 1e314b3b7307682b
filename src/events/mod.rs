//! Event wiring around the gate.
//!
//! # Data Flow
//! ```text
//! event source (callbacks, channel, replay.rs over JSON lines)
//!     → NodeEvent (event.rs)
//!     → EventLogger::observe (logger.rs): gate check first
//!     → format + LogSink::emit (sink.rs) when enabled
//! ```

pub mod event;
pub mod logger;
pub mod replay;
pub mod sink;

pub use event::{Category, NodeEvent, Resolution};
pub use logger::EventLogger;
pub use replay::{replay, ReplayStats};
pub use sink::{LogSink, MemorySink, Record, TracingSink};
