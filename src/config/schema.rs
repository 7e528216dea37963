//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dapp.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::discovery::list::DuplicatePolicy;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DappConfig {
    /// Provider discovery settings.
    pub discovery: DiscoveryConfig,

    /// Fixed fee and gas values for every submission.
    pub transaction: TransactionConfig,

    /// Sequencing policy tuning.
    pub sequencer: SequencerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Optional wallet backed by a JSON-RPC node.
    pub rpc_wallet: RpcWalletConfig,

    /// In-memory wallets announced on the discovery bus.
    pub simulated_wallets: Vec<SimulatedWalletConfig>,
}

/// Discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Capacity of the announcement broadcast channel.
    pub bus_capacity: usize,

    /// What the selectable provider list does with repeated announcements.
    pub duplicate_policy: DuplicatePolicy,

    /// How long the demo waits for announcements before selecting.
    pub window_ms: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            bus_capacity: 64,
            duplicate_policy: DuplicatePolicy::Keep,
            window_ms: 200,
        }
    }
}

/// Fixed transaction values. No gas estimation is ever performed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransactionConfig {
    /// Gas limit for each submission.
    pub gas_limit: u64,

    /// EIP-1559 fee cap in wei.
    pub max_fee_per_gas_wei: u64,

    /// EIP-1559 priority fee in wei.
    pub max_priority_fee_per_gas_wei: u64,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            gas_limit: 21_000,
            max_fee_per_gas_wei: 10_000_000_000,         // 10 gwei
            max_priority_fee_per_gas_wei: 1_000_000_000, // 1 gwei
        }
    }
}

/// Sequencer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Delay between overlapped submissions in the three-step variant.
    pub pacing_delay_ms: u64,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            pacing_delay_ms: 100,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// JSON-RPC backed wallet announced alongside the simulated ones.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcWalletConfig {
    /// Announce this wallet.
    pub enabled: bool,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Display name.
    pub name: String,

    /// Icon as a URL or RFC 2397 data URI.
    pub icon: String,

    /// Reverse-DNS identifier.
    pub rdns: String,
}

impl Default for RpcWalletConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            rpc_url: "http://localhost:8545".to_string(),
            name: "Local Node".to_string(),
            icon: String::new(),
            rdns: "local.node".to_string(),
        }
    }
}

/// An in-memory wallet.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulatedWalletConfig {
    /// Display name.
    pub name: String,

    /// Reverse-DNS identifier.
    pub rdns: String,

    /// Icon as a URL or RFC 2397 data URI.
    pub icon: String,

    /// Accounts the wallet holds; the first one is used for sequencing.
    pub accounts: Vec<String>,

    /// Decline every authorization prompt.
    pub reject_authorization: bool,

    /// Fixed latency per request in milliseconds.
    pub latency_ms: u64,

    /// Random extra latency per request, up to this many milliseconds.
    pub jitter_ms: u64,

    /// Announce immediately rather than only when asked.
    pub announce_on_start: bool,
}

impl Default for SimulatedWalletConfig {
    fn default() -> Self {
        Self {
            name: "Simulated Wallet".to_string(),
            rdns: "dev.simulated.wallet".to_string(),
            icon: "data:image/svg+xml,<svg xmlns=\"http://www.w3.org/2000/svg\"/>".to_string(),
            accounts: vec!["0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_string()],
            reject_authorization: false,
            latency_ms: 20,
            jitter_ms: 30,
            announce_on_start: true,
        }
    }
}
