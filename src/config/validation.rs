//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (capacity > 0, gas limit covers a transfer)
//! - Check that URLs and icon references parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DappConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::DappConfig;

/// Gas consumed by a plain value transfer.
pub const TRANSFER_GAS: u64 = 21_000;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &DappConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.discovery.bus_capacity == 0 {
        errors.push(ValidationError::new(
            "discovery.bus_capacity",
            "must be greater than zero",
        ));
    }

    let tx = &config.transaction;
    if tx.gas_limit < TRANSFER_GAS {
        errors.push(ValidationError::new(
            "transaction.gas_limit",
            format!("must be at least {TRANSFER_GAS}"),
        ));
    }
    if tx.max_priority_fee_per_gas_wei > tx.max_fee_per_gas_wei {
        errors.push(ValidationError::new(
            "transaction.max_priority_fee_per_gas_wei",
            "must not exceed max_fee_per_gas_wei",
        ));
    }

    if config.rpc_wallet.enabled {
        if let Err(e) = url::Url::parse(&config.rpc_wallet.rpc_url) {
            errors.push(ValidationError::new(
                "rpc_wallet.rpc_url",
                format!("invalid URL: {e}"),
            ));
        }
        check_icon(&config.rpc_wallet.icon, "rpc_wallet.icon", &mut errors);
    }

    for (i, wallet) in config.simulated_wallets.iter().enumerate() {
        if wallet.name.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("simulated_wallets[{i}].name"),
                "must not be empty",
            ));
        }
        check_icon(&wallet.icon, &format!("simulated_wallets[{i}].icon"), &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_icon(icon: &str, field: &str, errors: &mut Vec<ValidationError>) {
    if !icon.is_empty() && url::Url::parse(icon).is_err() {
        errors.push(ValidationError::new(field, "must be a URL or data URI"));
    }
}
