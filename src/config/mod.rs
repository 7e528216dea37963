//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DappConfig (validated, immutable)
//!     → handed to discovery, sequencer and observability at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; fee values never change mid-session
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::DappConfig;
pub use schema::DiscoveryConfig;
pub use schema::ObservabilityConfig;
pub use schema::RpcWalletConfig;
pub use schema::SequencerConfig;
pub use schema::SimulatedWalletConfig;
pub use schema::TransactionConfig;
