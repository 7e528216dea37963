//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::DappConfig;
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
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<DappConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), "Configuration file loaded");
    Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<DappConfig, ConfigError> {
    let config: DappConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::list::DuplicatePolicy;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [discovery]
            duplicate_policy = "replace"
            window_ms = 50

            [transaction]
            gas_limit = 30000

            [sequencer]
            pacing_delay_ms = 250

            [[simulated_wallets]]
            name = "Wallet A"
            accounts = ["0xABC"]
            latency_ms = 0

            [[simulated_wallets]]
            name = "Wallet B"
            reject_authorization = true
            "#,
        )
        .unwrap();

        assert_eq!(config.discovery.duplicate_policy, DuplicatePolicy::Replace);
        assert_eq!(config.discovery.bus_capacity, 64);
        assert_eq!(config.transaction.gas_limit, 30_000);
        assert_eq!(config.transaction.max_fee_per_gas_wei, 10_000_000_000);
        assert_eq!(config.sequencer.pacing_delay_ms, 250);
        assert_eq!(config.simulated_wallets.len(), 2);
        assert_eq!(config.simulated_wallets[0].accounts, vec!["0xABC"]);
        assert!(config.simulated_wallets[1].reject_authorization);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[transaction\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_lists_every_problem() {
        let err = parse_config(
            r#"
            [discovery]
            bus_capacity = 0

            [transaction]
            gas_limit = 1000
            "#,
        )
        .unwrap_err();

        match &err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("Validation failed: "));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/dapp.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
