//! Configuration schema definitions.
//!
//! This module defines the configuration file structure for the gate.
//! All sections default so a file holding only `[categories]` is valid.

use serde::Deserialize;

use crate::gate::ConfigTree;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Logging output settings.
    pub observability: ObservabilityConfig,

    /// Hot reload settings.
    pub watch: WatchConfig,

    /// Category overrides handed to the gate.
    pub categories: ConfigTree,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info", "log_gate=debug").
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

/// Config file watching.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Reload the gate when the config file changes.
    pub enabled: bool,

    /// Poll interval for backends that fall back to polling (seconds).
    pub poll_interval_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_secs: 2,
        }
    }
}
