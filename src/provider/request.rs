//! The EIP-1193 `request` capability and its typed wrapper.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;

use crate::provider::transaction::TransactionTemplate;
use crate::provider::types::{methods, ProviderError, ProviderResult, RequestArguments};

/// A wallet's request entry point.
///
/// Each call is a single asynchronous request/response exchange. The dapp
/// treats implementations as black boxes beyond this method.
#[async_trait]
pub trait RequestCapability: Send + Sync + fmt::Debug {
    /// Perform one JSON-RPC style request.
    async fn request(&self, args: RequestArguments) -> ProviderResult<Value>;
}

/// Shared, cloneable handle to a provider's request capability.
///
/// Adds typed helpers for the handful of methods the dapp uses.
#[derive(Clone)]
pub struct ProviderHandle {
    inner: Arc<dyn RequestCapability>,
}

impl ProviderHandle {
    /// Wrap an already shared capability.
    pub fn new(capability: Arc<dyn RequestCapability>) -> Self {
        Self { inner: capability }
    }

    /// Wrap an owned capability.
    pub fn from_capability<C>(capability: C) -> Self
    where
        C: RequestCapability + 'static,
    {
        Self {
            inner: Arc::new(capability),
        }
    }

    /// Send a raw request.
    pub async fn request(&self, args: RequestArguments) -> ProviderResult<Value> {
        self.inner.request(args).await
    }

    /// Ask the user to grant account access.
    pub async fn request_accounts(&self) -> ProviderResult<Vec<String>> {
        let value = self
            .request(RequestArguments::new(methods::REQUEST_ACCOUNTS))
            .await?;
        decode_accounts(methods::REQUEST_ACCOUNTS, value)
    }

    /// List the accounts the page is currently authorized for.
    pub async fn accounts(&self) -> ProviderResult<Vec<String>> {
        let value = self.request(RequestArguments::new(methods::ACCOUNTS)).await?;
        decode_accounts(methods::ACCOUNTS, value)
    }

    /// Submit a transaction, returning its hash.
    pub async fn send_transaction(&self, tx: &TransactionTemplate) -> ProviderResult<String> {
        let params = serde_json::to_value(tx).map_err(|e| {
            ProviderError::invalid_response(methods::SEND_TRANSACTION, e.to_string())
        })?;
        let value = self
            .request(RequestArguments::with_params(
                methods::SEND_TRANSACTION,
                vec![params],
            ))
            .await?;

        match value {
            Value::String(hash) => Ok(hash),
            other => Err(ProviderError::invalid_response(
                methods::SEND_TRANSACTION,
                format!("expected transaction hash, got {other}"),
            )),
        }
    }

    /// Fetch the receipt of a transaction. `None` while it is still pending.
    pub async fn transaction_receipt(&self, tx_hash: &str) -> ProviderResult<Option<Value>> {
        let value = self
            .request(RequestArguments::with_params(
                methods::GET_TRANSACTION_RECEIPT,
                vec![json!(tx_hash)],
            ))
            .await?;

        Ok(match value {
            Value::Null => None,
            receipt => Some(receipt),
        })
    }

    /// Whether both handles point at the same provider instance.
    pub fn same_provider(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProviderHandle").field(&self.inner).finish()
    }
}

fn decode_accounts(method: &str, value: Value) -> ProviderResult<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        other => serde_json::from_value(other)
            .map_err(|e| ProviderError::invalid_response(method, e.to_string())),
    }
}
