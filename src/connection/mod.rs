//! Connection management subsystem.
//!
//! # Data Flow
//! ```text
//! user selects ProviderDescriptor
//!     → manager.rs (eth_requestAccounts handshake)
//!     → state.rs (ActiveConnection, swapped in atomically)
//!     → readiness watch flips → sequencing triggers enabled
//!     → sequencer receives a snapshot Arc<ActiveConnection> per run
//! ```
//!
//! # Design Decisions
//! - One writer (the manager), many readers holding snapshots
//! - Authorization failures are logged and returned, never fatal

pub mod error;
pub mod manager;
pub mod state;

pub use error::AuthorizationError;
pub use manager::ConnectionManager;
pub use state::ActiveConnection;
