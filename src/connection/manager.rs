//! Connection manager: the single source of truth for the active provider.
//!
//! # Responsibilities
//! - Run the `eth_requestAccounts` handshake against a chosen descriptor
//! - Swap in the new connection atomically on success
//! - Leave the previous state alone on failure
//! - Signal readiness so sequencing triggers can be enabled

use arc_swap::ArcSwapOption;
use std::sync::Arc;
use tokio::sync::watch;

use crate::connection::error::AuthorizationError;
use crate::connection::state::ActiveConnection;
use crate::discovery::descriptor::ProviderDescriptor;
use crate::observability::metrics;

/// Holds at most one [`ActiveConnection`].
///
/// Only [`connect`](Self::connect) writes; everyone else reads snapshots.
#[derive(Debug)]
pub struct ConnectionManager {
    active: ArcSwapOption<ActiveConnection>,
    ready: watch::Sender<bool>,
}

impl ConnectionManager {
    /// Create a manager with no active connection.
    pub fn new() -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            active: ArcSwapOption::empty(),
            ready,
        }
    }

    /// Authorize `descriptor` and make it the active connection.
    ///
    /// Reconnecting to an already authorized provider is not special-cased;
    /// the provider is expected to answer without prompting again.
    pub async fn connect(
        &self,
        descriptor: &ProviderDescriptor,
    ) -> Result<Arc<ActiveConnection>, AuthorizationError> {
        tracing::info!(
            unique_id = %descriptor.unique_id(),
            name = %descriptor.display_name(),
            "Requesting account access"
        );

        let granted = match descriptor.provider().request_accounts().await {
            Ok(accounts) => accounts.len(),
            Err(e) => {
                metrics::record_connection(false);
                tracing::error!(
                    unique_id = %descriptor.unique_id(),
                    error = %e,
                    "Failed to connect to provider"
                );
                return Err(AuthorizationError::new(descriptor.unique_id(), e));
            }
        };

        let connection = Arc::new(ActiveConnection::new(descriptor));
        if let Some(previous) = self.active.swap(Some(Arc::clone(&connection))) {
            tracing::info!(
                previous = %previous.unique_id(),
                previous_connection = %previous.id(),
                "Replacing active connection"
            );
        }
        self.ready.send_replace(true);
        metrics::record_connection(true);

        tracing::info!(
            unique_id = %connection.unique_id(),
            connection_id = %connection.id(),
            granted_accounts = granted,
            "Connected to provider"
        );
        Ok(connection)
    }

    /// Snapshot of the active connection, if any.
    pub fn active(&self) -> Option<Arc<ActiveConnection>> {
        self.active.load_full()
    }

    pub fn is_connected(&self) -> bool {
        self.active.load().is_some()
    }

    /// Watch for readiness; flips to `true` after the first successful connect.
    pub fn readiness(&self) -> watch::Receiver<bool> {
        self.ready.subscribe()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::descriptor::ProviderInfo;
    use crate::provider::{ProviderHandle, SimulatedWallet};

    fn descriptor(id: &str, wallet: SimulatedWallet) -> ProviderDescriptor {
        ProviderDescriptor::new(
            ProviderInfo::new(id, id),
            ProviderHandle::from_capability(wallet),
        )
    }

    #[tokio::test]
    async fn test_starts_unset() {
        let manager = ConnectionManager::new();
        assert!(manager.active().is_none());
        assert!(!manager.is_connected());
        assert!(!*manager.readiness().borrow());
    }

    #[tokio::test]
    async fn test_connect_sets_active_and_ready() {
        let manager = ConnectionManager::new();
        let mut ready = manager.readiness();
        let wallet = descriptor("a", SimulatedWallet::new(vec!["0xabc".into()]));

        let connection = manager.connect(&wallet).await.unwrap();
        assert_eq!(connection.unique_id(), "a");
        assert!(connection.provider().same_provider(wallet.provider()));
        assert!(ready.has_changed().unwrap());
        assert!(*ready.borrow_and_update());
        assert_eq!(manager.active().unwrap().id(), connection.id());
    }

    #[tokio::test]
    async fn test_first_failure_leaves_unset() {
        let manager = ConnectionManager::new();
        let wallet = descriptor("a", SimulatedWallet::new(vec!["0xabc".into()]).rejecting());

        let err = manager.connect(&wallet).await.unwrap_err();
        assert!(err.is_user_rejection());
        assert_eq!(err.provider, "a");
        assert!(manager.active().is_none());
        assert!(!*manager.readiness().borrow());
    }

    #[tokio::test]
    async fn test_reconnect_same_provider_creates_new_connection() {
        let manager = ConnectionManager::new();
        let wallet = descriptor("a", SimulatedWallet::new(vec!["0xabc".into()]));

        let first = manager.connect(&wallet).await.unwrap();
        let second = manager.connect(&wallet).await.unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(manager.active().unwrap().id(), second.id());
    }
}
