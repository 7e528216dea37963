//! Wallet discovery and transaction sequencing for dapps.
//!
//! Wallets announce themselves over an EIP-6963 style discovery bus, the user
//! picks one, the connection manager authorizes it, and the sequencer issues a
//! short, ordered run of `eth_sendTransaction` requests through it.

pub mod config;
pub mod connection;
pub mod discovery;
pub mod observability;
pub mod provider;
pub mod sequencer;
pub mod session;

pub use config::schema::DappConfig;
pub use connection::ConnectionManager;
pub use discovery::{DiscoveryBus, ProviderRegistry};
pub use sequencer::Sequencer;
pub use session::DappSession;
