//! In-memory EIP-1193 wallet.
//!
//! # Responsibilities
//! - Grant or refuse account access like a user prompt would
//! - Assign nonces at submission time, before any simulated latency
//! - Keep receipts so the confirmation probe has something to find
//!
//! Latency and jitter make completion order differ from submission order,
//! which is exactly what the overlapped sequencing policy has to cope with.

use alloy::primitives::keccak256;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crate::config::schema::SimulatedWalletConfig;
use crate::provider::request::RequestCapability;
use crate::provider::types::{
    methods, ProviderError, ProviderResult, RequestArguments, UNSUPPORTED_METHOD_CODE,
};

/// A wallet that lives entirely in memory.
#[derive(Debug)]
pub struct SimulatedWallet {
    accounts: Vec<String>,
    approve_authorization: bool,
    authorized: AtomicBool,
    nonce: AtomicU64,
    block_number: AtomicU64,
    latency: Duration,
    jitter_ms: u64,
    receipts: DashMap<String, Value>,
}

impl SimulatedWallet {
    /// Create a wallet holding `accounts` that approves authorization.
    pub fn new(accounts: Vec<String>) -> Self {
        Self {
            accounts,
            approve_authorization: true,
            authorized: AtomicBool::new(false),
            nonce: AtomicU64::new(0),
            block_number: AtomicU64::new(1),
            latency: Duration::ZERO,
            jitter_ms: 0,
            receipts: DashMap::new(),
        }
    }

    /// Build a wallet from its configuration entry.
    pub fn from_config(config: &SimulatedWalletConfig) -> Self {
        let wallet = Self::new(config.accounts.clone())
            .with_latency(Duration::from_millis(config.latency_ms))
            .with_jitter_ms(config.jitter_ms);
        if config.reject_authorization {
            wallet.rejecting()
        } else {
            wallet
        }
    }

    /// Fixed delay applied to every request.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Extra random delay, up to `jitter_ms`, applied to every request.
    pub fn with_jitter_ms(mut self, jitter_ms: u64) -> Self {
        self.jitter_ms = jitter_ms;
        self
    }

    /// Make the simulated user decline every authorization prompt.
    pub fn rejecting(mut self) -> Self {
        self.approve_authorization = false;
        self
    }

    /// Next nonce that will be assigned.
    pub fn next_nonce(&self) -> u64 {
        self.nonce.load(Ordering::SeqCst)
    }

    /// Number of transactions accepted so far.
    pub fn submitted(&self) -> usize {
        self.receipts.len()
    }

    async fn simulate_latency(&self) {
        let jitter = if self.jitter_ms > 0 {
            Duration::from_millis(fastrand::u64(..=self.jitter_ms))
        } else {
            Duration::ZERO
        };
        let delay = self.latency + jitter;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn owns(&self, account: &str) -> bool {
        self.accounts
            .iter()
            .any(|owned| owned.eq_ignore_ascii_case(account))
    }

    fn send_transaction(&self, params: &[Value]) -> ProviderResult<Value> {
        if !self.authorized.load(Ordering::SeqCst) {
            return Err(ProviderError::Unauthorized);
        }
        let tx = params.first().ok_or_else(|| ProviderError::Rpc {
            code: -32602,
            message: "missing transaction object".to_string(),
        })?;
        let from = tx
            .get("from")
            .and_then(Value::as_str)
            .ok_or_else(|| ProviderError::Rpc {
                code: -32602,
                message: "missing from address".to_string(),
            })?;
        if !self.owns(from) {
            return Err(ProviderError::Unauthorized);
        }

        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        let block_number = self.block_number.fetch_add(1, Ordering::SeqCst);

        let mut preimage = from.to_ascii_lowercase().into_bytes();
        preimage.extend_from_slice(&nonce.to_be_bytes());
        let tx_hash = keccak256(&preimage).to_string();

        tracing::debug!(from = %from, nonce, tx_hash = %tx_hash, "Simulated wallet accepted transaction");

        self.receipts.insert(
            tx_hash.clone(),
            json!({
                "transactionHash": tx_hash,
                "from": from,
                "to": tx.get("to").cloned().unwrap_or(Value::Null),
                "nonce": format!("{nonce:#x}"),
                "blockNumber": format!("{block_number:#x}"),
                "status": "0x1",
            }),
        );

        Ok(Value::String(tx_hash))
    }
}

#[async_trait]
impl RequestCapability for SimulatedWallet {
    async fn request(&self, args: RequestArguments) -> ProviderResult<Value> {
        // Decide the outcome first so nonces follow submission order even
        // when the reply is delayed.
        let outcome = match args.method.as_str() {
            methods::REQUEST_ACCOUNTS => {
                if self.approve_authorization {
                    self.authorized.store(true, Ordering::SeqCst);
                    Ok(json!(self.accounts))
                } else {
                    Err(ProviderError::UserRejected)
                }
            }
            methods::ACCOUNTS => {
                if self.authorized.load(Ordering::SeqCst) {
                    Ok(json!(self.accounts))
                } else {
                    Ok(json!([]))
                }
            }
            methods::SEND_TRANSACTION => self.send_transaction(&args.params),
            methods::GET_TRANSACTION_RECEIPT => {
                let receipt = args
                    .params
                    .first()
                    .and_then(Value::as_str)
                    .and_then(|hash| self.receipts.get(hash).map(|r| r.value().clone()));
                Ok(receipt.unwrap_or(Value::Null))
            }
            other => Err(ProviderError::from_code(
                UNSUPPORTED_METHOD_CODE,
                format!("Unsupported method: {other}"),
            )),
        };

        self.simulate_latency().await;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::request::ProviderHandle;
    use crate::provider::transaction::TransactionTemplate;

    fn handle(wallet: SimulatedWallet) -> ProviderHandle {
        ProviderHandle::from_capability(wallet)
    }

    #[tokio::test]
    async fn test_accounts_hidden_until_authorized() {
        let provider = handle(SimulatedWallet::new(vec!["0xabc".into()]));
        assert!(provider.accounts().await.unwrap().is_empty());

        assert_eq!(provider.request_accounts().await.unwrap(), vec!["0xabc"]);
        assert_eq!(provider.accounts().await.unwrap(), vec!["0xabc"]);
    }

    #[tokio::test]
    async fn test_rejecting_wallet() {
        let provider = handle(SimulatedWallet::new(vec!["0xabc".into()]).rejecting());
        assert_eq!(
            provider.request_accounts().await,
            Err(ProviderError::UserRejected)
        );
    }

    #[tokio::test]
    async fn test_unauthorized_submission() {
        let provider = handle(SimulatedWallet::new(vec!["0xabc".into()]));
        let tx = TransactionTemplate::self_transfer("0xabc", &Default::default());
        assert_eq!(
            provider.send_transaction(&tx).await,
            Err(ProviderError::Unauthorized)
        );
    }

    #[tokio::test]
    async fn test_nonces_and_receipts() {
        let wallet = std::sync::Arc::new(SimulatedWallet::new(vec!["0xAbC".into()]));
        let provider = ProviderHandle::new(wallet.clone());
        provider.request_accounts().await.unwrap();

        let tx = TransactionTemplate::self_transfer("0xabc", &Default::default());
        let first = provider.send_transaction(&tx).await.unwrap();
        let second = provider.send_transaction(&tx).await.unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("0x"));
        assert_eq!(wallet.next_nonce(), 2);
        assert_eq!(wallet.submitted(), 2);

        let receipt = provider.transaction_receipt(&second).await.unwrap().unwrap();
        assert_eq!(receipt["nonce"], "0x1");
        assert_eq!(receipt["status"], "0x1");

        assert_eq!(provider.transaction_receipt("0xdead").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let provider = handle(SimulatedWallet::new(Vec::new()));
        let err = provider
            .request(RequestArguments::new("wallet_switchEthereumChain"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(UNSUPPORTED_METHOD_CODE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let provider = handle(
            SimulatedWallet::new(vec!["0xabc".into()]).with_latency(Duration::from_millis(250)),
        );
        let started = tokio::time::Instant::now();
        provider.request_accounts().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(250));
    }
}
