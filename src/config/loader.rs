//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GateConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Config file is empty")]
    Empty,
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<GateConfig, ConfigError> {
    let config: GateConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GateConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load a changed config file for hot reload.
///
/// Unlike [`load_config`], a file holding nothing but whitespace is rejected:
/// it is what a reader sees between truncation and rewrite, and accepting it
/// would enable every category.
pub fn reload_config(path: &Path) -> Result<GateConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(ConfigError::Empty);
    }
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let err = parse_config("[categories\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_validation_error_lists_everything() {
        let err = parse_config(
            r#"
            [observability]
            log_level = "x=bogus"
            [watch]
            poll_interval_secs = 0
            "#,
        )
        .unwrap_err();

        match &err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("poll_interval_secs"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/log-gate/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_reload_rejects_empty_file() {
        let path = std::env::temp_dir().join(format!("log-gate-empty-{}.toml", std::process::id()));
        std::fs::write(&path, " \n").unwrap();

        assert!(load_config(&path).unwrap().categories.is_leaf());
        assert!(matches!(reload_config(&path).unwrap_err(), ConfigError::Empty));

        std::fs::write(&path, "[categories]\nstop = false\n").unwrap();
        assert_eq!(reload_config(&path).unwrap().categories.child("stop").unwrap().value(), "false");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_categories_only() {
        let config = parse_config("[categories]\nstart = \"off\"\n").unwrap();
        assert_eq!(config.categories.child("start").unwrap().value(), "off");
    }
}
