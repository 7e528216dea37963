//! Sequencer entry point shared by every policy.
//!
//! # Responsibilities
//! - Validate preconditions (active connection, non-empty accounts)
//! - Dispatch to the strict or overlapped policy
//! - Turn every outcome into a result entry and a status line
//!
//! # Design Decisions
//! - Errors never escape a run; they become the last entry of the log
//! - No retries: a failed step ends the run
//! - The connection is an explicit argument, not ambient state

use std::sync::Arc;
use std::time::Duration;

use crate::config::schema::{DappConfig, TransactionConfig};
use crate::connection::state::ActiveConnection;
use crate::observability::metrics;
use crate::provider::transaction::TransactionTemplate;
use crate::sequencer::status::{StatusLine, StatusSink};
use crate::sequencer::types::{SequenceEntry, SequenceError, SequencePolicy, SequenceResult, Step};
use crate::sequencer::{overlapped, strict};

/// Progress line pushed when a run starts.
pub const SENDING_MESSAGE: &str = "Sending transactions...";

/// Issues fixed transaction sequences through an active connection.
#[derive(Debug, Clone)]
pub struct Sequencer {
    fees: TransactionConfig,
    pacing: Duration,
}

impl Sequencer {
    /// Create a sequencer with fixed fees and the overlapped pacing delay.
    pub fn new(fees: TransactionConfig, pacing: Duration) -> Self {
        Self { fees, pacing }
    }

    /// Create a sequencer from the loaded configuration.
    pub fn from_config(config: &DappConfig) -> Self {
        Self::new(
            config.transaction.clone(),
            Duration::from_millis(config.sequencer.pacing_delay_ms),
        )
    }

    /// Run `policy` against `connection`, reporting to `status`.
    ///
    /// Never fails: problems end up as the final entry of the returned log
    /// and as an error line on the status feed.
    pub async fn run(
        &self,
        policy: SequencePolicy,
        connection: Option<Arc<ActiveConnection>>,
        status: &dyn StatusSink,
    ) -> SequenceResult {
        let mut recorder = Recorder::new(policy, status);

        let Some(connection) = connection else {
            recorder.failed(SequenceError::NoProvider);
            return recorder.finish();
        };

        status.push(StatusLine::progress(SENDING_MESSAGE));
        tracing::info!(
            policy = %policy,
            connection_id = %connection.id(),
            unique_id = %connection.unique_id(),
            "Starting transaction sequence"
        );

        if let Err(error) = self.execute(policy, &connection, &mut recorder).await {
            recorder.failed(error);
        }
        recorder.finish()
    }

    async fn execute(
        &self,
        policy: SequencePolicy,
        connection: &ActiveConnection,
        recorder: &mut Recorder<'_>,
    ) -> Result<(), SequenceError> {
        let accounts = connection
            .accounts()
            .await
            .map_err(SequenceError::Accounts)?;
        let account = accounts.first().ok_or(SequenceError::NoAccounts)?;

        let provider = connection.provider();
        let count = policy.submissions();
        match policy {
            SequencePolicy::Strict => strict::run(self, provider, account, recorder).await,
            SequencePolicy::OverlappedPair => {
                overlapped::run(self, provider, account, count, None, recorder).await
            }
            SequencePolicy::OverlappedTriple => {
                overlapped::run(self, provider, account, count, Some(self.pacing), recorder).await
            }
        }
    }

    /// Fresh template for one submission.
    pub(crate) fn template(&self, account: &str) -> TransactionTemplate {
        TransactionTemplate::self_transfer(account, &self.fees)
    }
}

/// Appends to the result log and mirrors each entry onto the status feed.
pub(crate) struct Recorder<'a> {
    policy: SequencePolicy,
    status: &'a dyn StatusSink,
    result: SequenceResult,
}

impl<'a> Recorder<'a> {
    fn new(policy: SequencePolicy, status: &'a dyn StatusSink) -> Self {
        Self {
            policy,
            status,
            result: SequenceResult::default(),
        }
    }

    pub(crate) fn sent(&mut self, step: Step, tx_hash: String) {
        tracing::info!(policy = %self.policy, step = %step, tx_hash = %tx_hash, "Transaction sent");
        metrics::record_submission(self.policy.name(), true);

        let entry = SequenceEntry::Sent { step, tx_hash };
        self.status.push(StatusLine::sent(entry.status_text()));
        self.result.push(entry);
    }

    fn failed(&mut self, error: SequenceError) {
        tracing::error!(policy = %self.policy, error = %error, step = ?error.step(), "Transaction error");
        if !error.is_precondition() {
            metrics::record_submission(self.policy.name(), false);
        }

        let entry = SequenceEntry::Failed(error);
        self.status.push(StatusLine::error(entry.status_text()));
        self.result.push(entry);
    }

    fn finish(self) -> SequenceResult {
        self.result
    }
}
