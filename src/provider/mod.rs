//! Wallet provider contract (EIP-1193) and built-in implementations.
//!
//! # Data Flow
//! ```text
//! discovery (ProviderDescriptor)
//!     → request.rs (RequestCapability, typed ProviderHandle calls)
//!     → transaction.rs (fixed self-transfer template, hex quantities)
//!     → simulated.rs / rpc.rs (in-memory wallet or JSON-RPC node)
//! ```
//!
//! # Design Decisions
//! - The dapp only ever talks to a provider through `request`; everything
//!   else about the wallet (signing, chain, nonces) is opaque
//! - Errors keep the EIP-1193 numeric codes so user rejection can be told
//!   apart from transport faults

pub mod request;
pub mod rpc;
pub mod simulated;
pub mod transaction;
pub mod types;

pub use request::{ProviderHandle, RequestCapability};
pub use rpc::RpcWallet;
pub use simulated::SimulatedWallet;
pub use transaction::TransactionTemplate;
pub use types::{ProviderError, ProviderResult, RequestArguments};
