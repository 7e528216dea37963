//! Dapp session: the page surface without the page.
//!
//! # Responsibilities
//! - Keep the selectable provider list fed from discovery
//! - Connect the provider the user picks
//! - Expose one trigger per sequencing policy and the shared status feed
//!
//! # Design Decisions
//! - Triggers are always callable; with no connection they report the
//!   precondition error on the feed instead of panicking or hiding
//! - Each trigger takes a fresh snapshot of the active connection

use std::sync::Arc;
use thiserror::Error;

use crate::config::schema::DappConfig;
use crate::connection::{ActiveConnection, AuthorizationError, ConnectionManager};
use crate::discovery::{
    DiscoveryBus, DiscoveryListener, ProviderDescriptor, ProviderList, ProviderRegistry,
};
use crate::sequencer::{SequencePolicy, SequenceResult, Sequencer, StatusFeed};

/// Errors surfaced by [`DappSession::select`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No provider with id {0} has been announced")]
    UnknownProvider(String),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
}

/// Everything one page session needs.
#[derive(Debug)]
pub struct DappSession {
    registry: ProviderRegistry,
    providers: ProviderList,
    connections: ConnectionManager,
    sequencer: Sequencer,
    status: StatusFeed,
    listener: Option<DiscoveryListener>,
}

impl DappSession {
    /// Create a session on `bus`. Discovery starts with [`start_discovery`](Self::start_discovery).
    pub fn new(bus: DiscoveryBus, config: &DappConfig) -> Self {
        Self {
            registry: ProviderRegistry::new(bus),
            providers: ProviderList::new(config.discovery.duplicate_policy),
            connections: ConnectionManager::new(),
            sequencer: Sequencer::from_config(config),
            status: StatusFeed::new(),
            listener: None,
        }
    }

    /// Start listening for announcements. Calling it again is a no-op.
    pub fn start_discovery(&mut self) {
        if self.listener.is_none() {
            self.listener = Some(self.registry.listen(self.providers.sink()));
        }
    }

    /// Ask wallets to announce again.
    pub fn refresh_providers(&self) {
        self.registry.request_providers();
    }

    /// Selectable entries in announcement order.
    pub fn providers(&self) -> Vec<ProviderDescriptor> {
        self.providers.entries()
    }

    /// Connect the most recently announced provider with `unique_id`.
    pub async fn select(&self, unique_id: &str) -> Result<Arc<ActiveConnection>, SessionError> {
        let descriptor = self
            .providers
            .find(unique_id)
            .ok_or_else(|| SessionError::UnknownProvider(unique_id.to_string()))?;
        Ok(self.connect(&descriptor).await?)
    }

    /// Connect a specific descriptor (e.g. one entry of [`providers`](Self::providers)).
    pub async fn connect(
        &self,
        descriptor: &ProviderDescriptor,
    ) -> Result<Arc<ActiveConnection>, AuthorizationError> {
        self.connections.connect(descriptor).await
    }

    /// Whether the sequencing triggers are enabled.
    pub fn triggers_enabled(&self) -> bool {
        self.connections.is_connected()
    }

    /// "Send 2 Sequential Transactions".
    pub async fn send_sequential(&self) -> SequenceResult {
        self.trigger(SequencePolicy::Strict).await
    }

    /// "Send 3 Sequential Transactions" without waiting for confirmations.
    pub async fn send_overlapped(&self) -> SequenceResult {
        self.trigger(SequencePolicy::OverlappedTriple).await
    }

    /// Run any policy against the current connection.
    pub async fn trigger(&self, policy: SequencePolicy) -> SequenceResult {
        self.sequencer
            .run(policy, self.connections.active(), &self.status)
            .await
    }

    pub fn connections(&self) -> &ConnectionManager {
        &self.connections
    }

    pub fn status(&self) -> &StatusFeed {
        &self.status
    }
}
