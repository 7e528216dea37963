//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! discovery, connection, sequencer produce:
//!     → tracing events (structured fields: unique_id, policy, step, tx_hash)
//!     → metrics.rs (counters through the `metrics` facade)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, filtered by RUST_LOG or config)
//!     → any metrics recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Console diagnostics go through `tracing`; user-facing progress goes
//!   through the sequencer's status feed, never through logs
//! - No exporter is installed here; without a recorder counters are no-ops

pub mod logging;
pub mod metrics;
