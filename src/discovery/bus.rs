//! Page-wide discovery event channel.

use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{broadcast, mpsc};

use crate::discovery::descriptor::ProviderDescriptor;

/// Default number of buffered events per subscriber.
pub const DEFAULT_CAPACITY: usize = 64;

/// Events exchanged between the dapp and wallets.
#[derive(Debug, Clone)]
pub enum DiscoveryEvent {
    /// A wallet announces itself (`eip6963:announceProvider`).
    AnnounceProvider(ProviderDescriptor),
    /// The dapp asks every wallet to announce (`eip6963:requestProvider`).
    RequestProvider,
}

/// Broadcast channel standing in for the page's event target.
///
/// Every subscriber sees every event sent after it subscribed. Event
/// subscribers share a bounded buffer and may lag; announcement subscribers
/// get their own unbounded queue and never miss one. Cloning the bus shares
/// the same channel.
#[derive(Debug, Clone)]
pub struct DiscoveryBus {
    tx: broadcast::Sender<DiscoveryEvent>,
    announcements: Arc<Mutex<Vec<mpsc::UnboundedSender<ProviderDescriptor>>>>,
}

impl DiscoveryBus {
    /// Create a bus buffering up to `capacity` events per event subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            announcements: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Subscribe to all events sent from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DiscoveryEvent> {
        self.tx.subscribe()
    }

    /// Subscribe to announcements sent from now on, without a buffer limit.
    ///
    /// The receiver yields `None` once every clone of the bus is dropped.
    pub fn subscribe_announcements(&self) -> mpsc::UnboundedReceiver<ProviderDescriptor> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.announcements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Broadcast a provider announcement.
    pub fn announce(&self, descriptor: ProviderDescriptor) {
        tracing::trace!(unique_id = %descriptor.unique_id(), "Announcing provider");
        self.announcements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|subscriber| subscriber.send(descriptor.clone()).is_ok());
        // No subscribers just means nobody is listening yet.
        let _ = self.tx.send(DiscoveryEvent::AnnounceProvider(descriptor));
    }

    /// Broadcast a request for providers to announce.
    pub fn request_provider(&self) {
        // No subscribers just means no wallet is listening yet.
        let _ = self.tx.send(DiscoveryEvent::RequestProvider);
    }

    /// Number of live event subscribers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for DiscoveryBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::descriptor::ProviderInfo;
    use crate::provider::{ProviderHandle, SimulatedWallet};

    fn descriptor(id: &str) -> ProviderDescriptor {
        ProviderDescriptor::new(
            ProviderInfo::new(id, id),
            ProviderHandle::from_capability(SimulatedWallet::new(Vec::new())),
        )
    }

    #[test]
    fn test_announcements_outlast_event_buffer() {
        let bus = DiscoveryBus::new(2);
        let mut events = bus.subscribe();
        let mut announcements = bus.subscribe_announcements();

        for i in 0..5 {
            bus.announce(descriptor(&format!("w{i}")));
        }

        assert!(matches!(
            events.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(3))
        ));
        for i in 0..5 {
            assert_eq!(announcements.try_recv().unwrap().unique_id(), format!("w{i}"));
        }
    }

    #[test]
    fn test_dropped_announcement_subscriber_is_pruned() {
        let bus = DiscoveryBus::default();
        drop(bus.subscribe_announcements());
        let _kept = bus.subscribe_announcements();

        bus.announce(descriptor("a"));
        assert_eq!(bus.announcements.lock().unwrap().len(), 1);
    }
}
