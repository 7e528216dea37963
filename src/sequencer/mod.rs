//! Transaction sequencing subsystem.
//!
//! # Data Flow
//! ```text
//! trigger(policy, Option<Arc<ActiveConnection>>)
//!     → engine.rs (preconditions: connection, eth_accounts non-empty)
//!     → strict.rs      submit #1 → receipt probe → submit #2
//!       overlapped.rs  submit #1 [→ pace] → submit #2 [→ pace → submit #3]
//!                      → await #1 → await #2 [→ await #3]
//!     → SequenceResult (append-only) + status.rs feed
//! ```
//!
//! # Design Decisions
//! - Each submission gets a freshly built template
//! - Result order is submission order, never completion order
//! - No cancellation and no timeouts: a hung provider hangs the run

pub mod engine;
mod overlapped;
pub mod status;
mod strict;
pub mod types;

pub use engine::{Sequencer, SENDING_MESSAGE};
pub use status::{StatusFeed, StatusKind, StatusLine, StatusSink};
pub use types::{SequenceEntry, SequenceError, SequencePolicy, SequenceResult, Step};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransactionConfig;
    use crate::connection::ConnectionManager;
    use crate::discovery::{ProviderDescriptor, ProviderInfo};
    use crate::provider::{ProviderHandle, SimulatedWallet};
    use std::sync::Arc;
    use std::time::Duration;

    async fn connected(wallet: SimulatedWallet) -> (ConnectionManager, Arc<SimulatedWallet>) {
        let wallet = Arc::new(wallet);
        let descriptor = ProviderDescriptor::new(
            ProviderInfo::new("sim", "Simulated"),
            ProviderHandle::new(wallet.clone()),
        );
        let manager = ConnectionManager::new();
        manager.connect(&descriptor).await.unwrap();
        (manager, wallet)
    }

    fn sequencer() -> Sequencer {
        Sequencer::new(TransactionConfig::default(), Duration::from_millis(100))
    }

    #[tokio::test]
    async fn test_without_connection() {
        let feed = StatusFeed::new();
        let result = sequencer().run(SequencePolicy::Strict, None, &feed).await;

        assert_eq!(result.error(), Some(&SequenceError::NoProvider));
        assert_eq!(feed.texts(), vec!["Error: No provider selected"]);
    }

    #[tokio::test]
    async fn test_strict_against_simulated_wallet() {
        let (manager, wallet) = connected(SimulatedWallet::new(vec!["0xabc".into()])).await;
        let feed = StatusFeed::new();

        let result = sequencer()
            .run(SequencePolicy::Strict, manager.active(), &feed)
            .await;

        assert!(result.is_success());
        assert_eq!(result.tx_hashes().len(), 2);
        assert_eq!(wallet.next_nonce(), 2);
        assert_eq!(feed.texts()[0], SENDING_MESSAGE);
        assert!(feed.texts()[1].starts_with("First transaction sent: 0x"));
        assert!(feed.texts()[2].starts_with("Second transaction sent: 0x"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapped_triple_against_jittery_wallet() {
        let (manager, wallet) = connected(
            SimulatedWallet::new(vec!["0xabc".into()])
                .with_latency(Duration::from_millis(10))
                .with_jitter_ms(400),
        )
        .await;
        let feed = StatusFeed::new();

        let result = sequencer()
            .run(SequencePolicy::OverlappedTriple, manager.active(), &feed)
            .await;

        let steps: Vec<_> = result
            .entries()
            .iter()
            .map(|entry| match entry {
                SequenceEntry::Sent { step, .. } => *step,
                SequenceEntry::Failed(e) => panic!("unexpected failure: {e}"),
            })
            .collect();
        assert_eq!(steps, vec![Step::First, Step::Second, Step::Third]);
        assert_eq!(wallet.next_nonce(), 3);
    }
}
