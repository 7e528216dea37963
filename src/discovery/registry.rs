//! Provider registry: the dapp side of EIP-6963 discovery.
//!
//! # Responsibilities
//! - Deliver every announcement to a sink, in arrival order
//! - Solicit announcements from wallets that only answer on request
//!
//! # Design Decisions
//! - No deduplication here; repeated announcements reach the sink again
//!   (see [`ProviderList`](crate::discovery::list::ProviderList) for policies)
//! - Subscription happens before the request broadcast, so answers to our own
//!   request are never missed
//! - Announcements arrive through an unbounded per-listener queue; a burst
//!   larger than the bus buffer still reaches the sink in full

use futures_util::stream::{self, Stream};
use tokio::task::JoinHandle;

use crate::discovery::bus::DiscoveryBus;
use crate::discovery::descriptor::ProviderDescriptor;
use crate::observability::metrics;

/// Collects provider announcements from a discovery bus.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    bus: DiscoveryBus,
}

impl ProviderRegistry {
    /// Create a registry on top of `bus`.
    pub fn new(bus: DiscoveryBus) -> Self {
        Self { bus }
    }

    /// Invoke `sink` once per announcement for as long as the returned
    /// listener is alive, then broadcast a provider request.
    pub fn listen<F>(&self, mut sink: F) -> DiscoveryListener
    where
        F: FnMut(ProviderDescriptor) + Send + 'static,
    {
        let mut rx = self.bus.subscribe_announcements();

        let task = tokio::spawn(async move {
            while let Some(descriptor) = rx.recv().await {
                tracing::debug!(
                    unique_id = %descriptor.unique_id(),
                    name = %descriptor.display_name(),
                    "Provider announced"
                );
                metrics::record_announcement();
                sink(descriptor);
            }
            tracing::debug!("Discovery bus closed, listener exiting");
        });

        self.request_providers();
        DiscoveryListener { task }
    }

    /// Announcements as a long-lived stream.
    ///
    /// Only events sent after this call are yielded; call
    /// [`request_providers`](Self::request_providers) afterwards to solicit
    /// wallets that already announced.
    pub fn subscribe(&self) -> impl Stream<Item = ProviderDescriptor> + Send + 'static {
        stream::unfold(self.bus.subscribe_announcements(), |mut rx| async move {
            let descriptor = rx.recv().await?;
            Some((descriptor, rx))
        })
    }

    /// Ask every wallet on the bus to announce again.
    pub fn request_providers(&self) {
        tracing::debug!("Requesting providers");
        self.bus.request_provider();
    }
}

/// Keeps a [`ProviderRegistry::listen`] subscription alive.
///
/// Dropping the listener stops sink invocations.
#[derive(Debug)]
pub struct DiscoveryListener {
    task: JoinHandle<()>,
}

impl DiscoveryListener {
    /// Whether the listener has stopped on its own (bus closed).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for DiscoveryListener {
    fn drop(&mut self) {
        self.task.abort();
    }
}
