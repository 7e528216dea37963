//! Overlapped policy: fire every submission, then collect in order.
//!
//! # Ordering
//! ```text
//! submit #1 ─┬─ pacing ─ submit #2 ─┬─ pacing ─ submit #3
//!            │                      │
//! await #1 ──┴──────── await #2 ────┴──────── await #3
//! ```
//! Submission k reaches the provider before submission k+1 is created, so
//! request order is fixed regardless of how the runtime schedules tasks.
//! Results are collected in submission order even when a later request
//! settles first. The pacing delay only biases the wallet toward assigning
//! nonces in submission order; it guarantees nothing.

use std::task::Poll;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::provider::request::ProviderHandle;
use crate::provider::transaction::TransactionTemplate;
use crate::provider::types::ProviderResult;
use crate::sequencer::engine::{Recorder, Sequencer};
use crate::sequencer::types::{SequenceError, Step};

/// Submit `count` transactions without awaiting settlement, then await each
/// in submission order.
///
/// A failure stops the awaiting; requests already in flight are left to
/// finish on their own.
pub(crate) async fn run(
    sequencer: &Sequencer,
    provider: &ProviderHandle,
    account: &str,
    count: usize,
    pacing: Option<Duration>,
    recorder: &mut Recorder<'_>,
) -> Result<(), SequenceError> {
    let mut in_flight = Vec::with_capacity(count);

    for (index, step) in Step::ALL.into_iter().take(count).enumerate() {
        if index > 0 {
            if let Some(delay) = pacing {
                tokio::time::sleep(delay).await;
            }
        }

        tracing::debug!(step = %step, "Submitting without waiting for settlement");
        in_flight.push((step, submit(provider.clone(), sequencer.template(account)).await));
    }

    for (step, handle) in in_flight {
        let tx_hash = handle
            .await
            .map_err(|e| SequenceError::Task {
                step,
                reason: e.to_string(),
            })?
            .map_err(|source| SequenceError::Submission { step, source })?;
        recorder.sent(step, tx_hash);
    }

    Ok(())
}

/// Spawn one submission and return once its request has been issued.
async fn submit(
    provider: ProviderHandle,
    template: TransactionTemplate,
) -> JoinHandle<ProviderResult<String>> {
    let (issued_tx, issued_rx) = oneshot::channel();

    let handle = tokio::spawn(async move {
        let submission = provider.send_transaction(&template);
        tokio::pin!(submission);

        // The first poll hands the request to the provider.
        let first = futures_util::poll!(submission.as_mut());
        let _ = issued_tx.send(());
        match first {
            Poll::Ready(outcome) => outcome,
            Poll::Pending => submission.await,
        }
    });

    // An error means the task died before issuing; the handle reports why.
    let _ = issued_rx.await;
    handle
}
