//! Provider backed by a JSON-RPC node.
//!
//! # Responsibilities
//! - Forward every request verbatim to the node over HTTP
//! - Translate JSON-RPC error responses into EIP-1193 errors
//!
//! Useful against a development node with unlocked accounts (e.g. Anvil),
//! where `eth_requestAccounts` and `eth_sendTransaction` are served directly.

use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::transports::{RpcError, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::config::schema::RpcWalletConfig;
use crate::provider::request::RequestCapability;
use crate::provider::types::{ProviderError, ProviderResult, RequestArguments};

/// EIP-1193 capability that talks to a JSON-RPC endpoint.
#[derive(Clone)]
pub struct RpcWallet {
    provider: DynProvider,
    rpc_url: String,
}

impl RpcWallet {
    /// Create a wallet for the configured endpoint.
    ///
    /// No request is made until the first `request` call.
    pub fn connect(config: &RpcWalletConfig) -> ProviderResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            ProviderError::Transport(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let provider = ProviderBuilder::new().connect_http(url).erased();

        tracing::info!(rpc_url = %config.rpc_url, "RPC wallet initialized");

        Ok(Self {
            provider,
            rpc_url: config.rpc_url.clone(),
        })
    }

    /// The endpoint this wallet forwards to.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

#[async_trait]
impl RequestCapability for RpcWallet {
    async fn request(&self, args: RequestArguments) -> ProviderResult<Value> {
        let RequestArguments { method, params } = args;
        tracing::debug!(rpc_url = %self.rpc_url, method = %method, "Forwarding request");

        self.provider
            .raw_request::<_, Value>(method.into(), Value::Array(params))
            .await
            .map_err(map_transport_error)
    }
}

impl fmt::Debug for RpcWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcWallet")
            .field("rpc_url", &self.rpc_url)
            .finish()
    }
}

fn map_transport_error(err: TransportError) -> ProviderError {
    match err {
        RpcError::ErrorResp(payload) => {
            ProviderError::from_code(payload.code, payload.message.to_string())
        }
        other => ProviderError::Transport(other.to_string()),
    }
}
