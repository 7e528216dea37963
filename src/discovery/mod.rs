//! Provider discovery subsystem (EIP-6963).
//!
//! # Data Flow
//! ```text
//! wallets (announcer.rs)
//!     ──announceProvider──▶ bus.rs (DiscoveryBus) ──▶ registry.rs (listen / subscribe)
//!     ◀──requestProvider───                              │
//!                                                        ▼
//!                                             sink: list.rs (ProviderList)
//!                                                        │
//!                                                        ▼
//!                                              user selects a descriptor
//! ```
//!
//! # Design Decisions
//! - Discovery cannot fail; it can only produce zero results
//! - Arrival order is whatever the wallets produce and is preserved
//! - The bus is an explicit object, not a process-global event target

pub mod announcer;
pub mod bus;
pub mod descriptor;
pub mod list;
pub mod registry;

pub use announcer::{spawn_announcer, AnnouncerHandle};
pub use bus::{DiscoveryBus, DiscoveryEvent};
pub use descriptor::{ProviderDescriptor, ProviderInfo};
pub use list::{DuplicatePolicy, ProviderList};
pub use registry::{DiscoveryListener, ProviderRegistry};
