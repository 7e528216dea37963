//! The active connection.
//!
//! # Lifecycle
//! ```text
//! unset ──authorize ok──▶ connected ──authorize ok (any provider)──▶ replaced
//!   │                        │
//!   └─authorize failed─▶ unchanged ◀─┘
//! ```
//! A connection is never torn down; it lives until replaced.

use std::time::Instant;
use uuid::Uuid;

use crate::discovery::descriptor::{ProviderDescriptor, ProviderInfo};
use crate::provider::request::ProviderHandle;
use crate::provider::types::ProviderResult;

/// An authorized provider.
///
/// Accounts are not cached here; they are fetched again on every call to
/// [`accounts`](Self::accounts).
#[derive(Debug)]
pub struct ActiveConnection {
    id: Uuid,
    info: ProviderInfo,
    provider: ProviderHandle,
    connected_at: Instant,
}

impl ActiveConnection {
    pub(crate) fn new(descriptor: &ProviderDescriptor) -> Self {
        Self {
            id: Uuid::new_v4(),
            info: descriptor.info().clone(),
            provider: descriptor.provider().clone(),
            connected_at: Instant::now(),
        }
    }

    /// Identifier of this particular connection, for correlating logs.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn info(&self) -> &ProviderInfo {
        &self.info
    }

    pub fn unique_id(&self) -> &str {
        &self.info.uuid
    }

    pub fn provider(&self) -> &ProviderHandle {
        &self.provider
    }

    pub fn connected_at(&self) -> Instant {
        self.connected_at
    }

    /// Fetch the currently authorized accounts from the provider.
    pub async fn accounts(&self) -> ProviderResult<Vec<String>> {
        self.provider.accounts().await
    }
}
