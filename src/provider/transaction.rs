//! Fixed transaction template submitted by the sequencer.
//!
//! # Responsibilities
//! - Build a zero-value self-transfer for the authorized account
//! - Serialize quantities as `0x`-prefixed hex strings, as `eth_sendTransaction`
//!   expects
//!
//! Gas values are fixed at load time; nothing here estimates or queries fees.

use serde::{Serialize, Serializer};
use std::fmt::LowerHex;

use crate::config::schema::TransactionConfig;

/// Transaction request object passed to `eth_sendTransaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTemplate {
    /// Sending account.
    pub from: String,

    /// Recipient; always equal to `from`.
    pub to: String,

    /// Amount in wei; always zero.
    #[serde(serialize_with = "serialize_quantity")]
    pub value: u64,

    /// Gas limit.
    #[serde(rename = "gas", serialize_with = "serialize_quantity")]
    pub gas_limit: u64,

    /// EIP-1559 fee cap in wei.
    #[serde(serialize_with = "serialize_quantity")]
    pub max_fee_per_gas: u64,

    /// EIP-1559 tip in wei.
    #[serde(serialize_with = "serialize_quantity")]
    pub max_priority_fee_per_gas: u64,
}

impl TransactionTemplate {
    /// Build a fresh zero-value transfer from `account` to itself.
    pub fn self_transfer(account: &str, fees: &TransactionConfig) -> Self {
        Self {
            from: account.to_string(),
            to: account.to_string(),
            value: 0,
            gas_limit: fees.gas_limit,
            max_fee_per_gas: fees.max_fee_per_gas_wei,
            max_priority_fee_per_gas: fees.max_priority_fee_per_gas_wei,
        }
    }
}

fn serialize_quantity<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: LowerHex,
    S: Serializer,
{
    serializer.serialize_str(&format!("{value:#x}"))
}
