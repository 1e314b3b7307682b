//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GateConfig (validated, immutable)
//!     → categories handed to LogGate::configure
//!
//! On change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → new GateConfig sent over a channel
//!     → consumer swaps the gate table atomically
//! ```
//!
//! # Design Decisions
//! - A failed reload never touches the live gate table
//! - All fields have defaults to allow minimal configs

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, reload_config, ConfigError};
pub use schema::{GateConfig, ObservabilityConfig, WatchConfig};
pub use validation::ValidationError;
pub use watcher::ConfigWatcher;
