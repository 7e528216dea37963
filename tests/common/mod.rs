//! Shared utilities for integration testing.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

use wallet_sequencer::discovery::{ProviderDescriptor, ProviderInfo};
use wallet_sequencer::provider::types::methods;
use wallet_sequencer::provider::{
    ProviderError, ProviderHandle, ProviderResult, RequestArguments, RequestCapability,
};

/// One scripted answer to `eth_sendTransaction`.
#[derive(Debug, Clone)]
pub struct Submission {
    /// What the provider answers.
    pub outcome: Result<String, ProviderError>,
    /// Delay before answering.
    pub delay: Duration,
    /// Hold the answer until this many submissions have been issued in total.
    pub wait_for_submissions: Option<usize>,
}

impl Submission {
    pub fn ok(tx_hash: &str) -> Self {
        Self {
            outcome: Ok(tx_hash.to_string()),
            delay: Duration::ZERO,
            wait_for_submissions: None,
        }
    }

    pub fn err(error: ProviderError) -> Self {
        Self {
            outcome: Err(error),
            delay: Duration::ZERO,
            wait_for_submissions: None,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn once_submitted(mut self, count: usize) -> Self {
        self.wait_for_submissions = Some(count);
        self
    }
}

/// A recorded request.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: String,
    pub params: Vec<Value>,
    pub at: Instant,
}

/// Provider whose answers are scripted by the test.
#[derive(Debug)]
pub struct ScriptedProvider {
    authorization: Result<Vec<String>, ProviderError>,
    accounts: Vec<String>,
    submissions: Mutex<VecDeque<Submission>>,
    receipts: Mutex<VecDeque<Result<Value, ProviderError>>>,
    calls: Mutex<Vec<Call>>,
    issued: watch::Sender<usize>,
}

impl ScriptedProvider {
    /// Authorizes and reports `accounts`; every submission must be scripted.
    pub fn new(accounts: &[&str]) -> Self {
        let accounts: Vec<String> = accounts.iter().map(|a| a.to_string()).collect();
        let (issued, _) = watch::channel(0);
        Self {
            authorization: Ok(accounts.clone()),
            accounts,
            submissions: Mutex::new(VecDeque::new()),
            receipts: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            issued,
        }
    }

    /// Fail `eth_requestAccounts` with `error`.
    pub fn rejecting(mut self, error: ProviderError) -> Self {
        self.authorization = Err(error);
        self
    }

    /// Grant authorization but report `accounts` from `eth_accounts`.
    pub fn reporting_accounts(mut self, accounts: &[&str]) -> Self {
        self.accounts = accounts.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Queue the next `eth_sendTransaction` answer.
    pub fn submission(self, submission: Submission) -> Self {
        self.submissions.lock().unwrap().push_back(submission);
        self
    }

    /// Queue the next `eth_getTransactionReceipt` answer. Unscripted receipts are `null`.
    pub fn receipt(self, receipt: Result<Value, ProviderError>) -> Self {
        self.receipts.lock().unwrap().push_back(receipt);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.method).collect()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|c| c.method == method).count()
    }
}

#[async_trait]
impl RequestCapability for ScriptedProvider {
    async fn request(&self, args: RequestArguments) -> ProviderResult<Value> {
        self.calls.lock().unwrap().push(Call {
            method: args.method.clone(),
            params: args.params.clone(),
            at: Instant::now(),
        });

        match args.method.as_str() {
            methods::REQUEST_ACCOUNTS => self.authorization.clone().map(|a| json!(a)),
            methods::ACCOUNTS => Ok(json!(self.accounts)),
            methods::GET_TRANSACTION_RECEIPT => self
                .receipts
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Value::Null)),
            methods::SEND_TRANSACTION => {
                let script = self
                    .submissions
                    .lock()
                    .unwrap()
                    .pop_front()
                    .expect("unscripted eth_sendTransaction");
                self.issued.send_modify(|n| *n += 1);

                if let Some(count) = script.wait_for_submissions {
                    let mut issued = self.issued.subscribe();
                    issued.wait_for(|n| *n >= count).await.unwrap();
                }
                if !script.delay.is_zero() {
                    tokio::time::sleep(script.delay).await;
                }
                script.outcome.map(Value::String)
            }
            other => Err(ProviderError::from_code(4200, format!("unsupported {other}"))),
        }
    }
}

/// Wrap a scripted provider in a descriptor, keeping a handle for inspection.
pub fn descriptor(
    id: &str,
    name: &str,
    provider: ScriptedProvider,
) -> (ProviderDescriptor, Arc<ScriptedProvider>) {
    let provider = Arc::new(provider);
    let descriptor = ProviderDescriptor::new(
        ProviderInfo::new(id, name),
        ProviderHandle::new(provider.clone()),
    );
    (descriptor, provider)
}
