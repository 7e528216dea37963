//! Wallet side of discovery: announce on start and on every request.

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::discovery::bus::{DiscoveryBus, DiscoveryEvent};
use crate::discovery::descriptor::ProviderDescriptor;

/// Start announcing `descriptor` on `bus`.
///
/// The wallet answers every `RequestProvider` event with one announcement.
/// With `announce_on_start` it also announces once right away, the way
/// injected wallets do when the page loads.
pub fn spawn_announcer(
    bus: &DiscoveryBus,
    descriptor: ProviderDescriptor,
    announce_on_start: bool,
) -> AnnouncerHandle {
    let mut rx = bus.subscribe();
    if announce_on_start {
        bus.announce(descriptor.clone());
    }

    let bus = bus.clone();
    let unique_id = descriptor.unique_id().to_string();
    let task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(DiscoveryEvent::RequestProvider) => bus.announce(descriptor.clone()),
                Ok(DiscoveryEvent::AnnounceProvider(_)) => {}
                Err(RecvError::Lagged(skipped)) => {
                    // A request may have been among the skipped events.
                    tracing::warn!(skipped, unique_id = %descriptor.unique_id(), "Announcer lagged, re-announcing");
                    bus.announce(descriptor.clone());
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    tracing::info!(unique_id = %unique_id, announce_on_start, "Wallet announcer started");
    AnnouncerHandle { unique_id, task }
}

/// Running announcer. Dropping it withdraws the wallet from discovery.
#[derive(Debug)]
pub struct AnnouncerHandle {
    unique_id: String,
    task: JoinHandle<()>,
}

impl AnnouncerHandle {
    /// Id of the announced provider.
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }
}

impl Drop for AnnouncerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
