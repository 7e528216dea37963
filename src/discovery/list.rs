//! Selectable provider entries.
//!
//! # Duplicate handling
//! ```text
//! keep    → every announcement becomes its own entry (page behavior)
//! replace → a repeated id overwrites its entry in place
//! ignore  → a repeated id is dropped; the first announcement wins
//! ```

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::discovery::descriptor::ProviderDescriptor;

/// What to do when an id is announced again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Admit duplicates as separate entries.
    #[default]
    Keep,
    /// Replace the existing entry with the newer announcement.
    Replace,
    /// Drop the newer announcement.
    Ignore,
}

/// Ordered list of announced providers, shared between the discovery sink
/// and whoever renders the selection.
#[derive(Debug, Clone, Default)]
pub struct ProviderList {
    entries: Arc<Mutex<Vec<ProviderDescriptor>>>,
    policy: DuplicatePolicy,
}

impl ProviderList {
    /// Create an empty list with the given duplicate policy.
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Add an announcement. Returns `false` when the policy dropped it.
    pub fn insert(&self, descriptor: ProviderDescriptor) -> bool {
        let mut entries = self.lock();
        let existing = entries
            .iter()
            .position(|d| d.unique_id() == descriptor.unique_id());

        match (self.policy, existing) {
            (DuplicatePolicy::Replace, Some(index)) => {
                entries[index] = descriptor;
                true
            }
            (DuplicatePolicy::Ignore, Some(_)) => {
                tracing::debug!(unique_id = %descriptor.unique_id(), "Ignoring repeated announcement");
                false
            }
            _ => {
                entries.push(descriptor);
                true
            }
        }
    }

    /// A sink for [`ProviderRegistry::listen`](crate::discovery::ProviderRegistry::listen)
    /// that feeds this list.
    pub fn sink(&self) -> impl FnMut(ProviderDescriptor) + Send + 'static {
        let list = self.clone();
        move |descriptor| {
            list.insert(descriptor);
        }
    }

    /// Snapshot of the entries in announcement order.
    pub fn entries(&self) -> Vec<ProviderDescriptor> {
        self.lock().clone()
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<ProviderDescriptor> {
        self.lock().get(index).cloned()
    }

    /// Most recent entry with the given id.
    pub fn find(&self, unique_id: &str) -> Option<ProviderDescriptor> {
        self.lock()
            .iter()
            .rev()
            .find(|d| d.unique_id() == unique_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ProviderDescriptor>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
