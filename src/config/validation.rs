//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the log filter directive parses
//! - Check watch intervals are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Category values are never validated; unknown values mean "disabled"

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::GateConfig;

/// A single semantic problem in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid log_level {directive:?}: {reason}")]
    InvalidLogLevel { directive: String, reason: String },

    #[error("watch.poll_interval_secs must be greater than 0")]
    ZeroPollInterval,
}

/// Validate a parsed config.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = EnvFilter::try_new(&config.observability.log_level) {
        errors.push(ValidationError::InvalidLogLevel {
            directive: config.observability.log_level.clone(),
            reason: e.to_string(),
        });
    }

    if config.watch.enabled && config.watch.poll_interval_secs == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&GateConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GateConfig::default();
        config.observability.log_level = "log_gate=notalevel".to_string();
        config.watch.poll_interval_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ValidationError::InvalidLogLevel { .. }));
        assert_eq!(errors[1], ValidationError::ZeroPollInterval);
    }

    #[test]
    fn test_zero_interval_ok_when_not_watching() {
        let mut config = GateConfig::default();
        config.watch.enabled = false;
        config.watch.poll_interval_secs = 0;
        assert!(validate_config(&config).is_ok());
    }
}
