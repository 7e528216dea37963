//! Strict-sequential policy: submit, probe, submit.

use crate::provider::request::ProviderHandle;
use crate::sequencer::engine::{Recorder, Sequencer};
use crate::sequencer::types::{SequenceError, Step};

/// Submit two transactions, gating the second on a receipt probe for the first.
pub(crate) async fn run(
    sequencer: &Sequencer,
    provider: &ProviderHandle,
    account: &str,
    recorder: &mut Recorder<'_>,
) -> Result<(), SequenceError> {
    let first = provider
        .send_transaction(&sequencer.template(account))
        .await
        .map_err(|source| SequenceError::Submission {
            step: Step::First,
            source,
        })?;
    recorder.sent(Step::First, first.clone());

    // Pacing gate only: a missing receipt does not stop the second submission.
    let receipt = provider
        .transaction_receipt(&first)
        .await
        .map_err(|source| SequenceError::Probe {
            step: Step::First,
            source,
        })?;
    tracing::debug!(tx_hash = %first, mined = receipt.is_some(), "Confirmation probe returned");

    let second = provider
        .send_transaction(&sequencer.template(account))
        .await
        .map_err(|source| SequenceError::Submission {
            step: Step::Second,
            source,
        })?;
    recorder.sent(Step::Second, second);

    Ok(())
}
