//! Metrics collection.
//!
//! # Metrics
//! - `dapp_provider_announcements_total` (counter): announcements delivered to a sink
//! - `dapp_connection_attempts_total` (counter): authorization attempts by outcome
//! - `dapp_transaction_submissions_total` (counter): submissions by policy and outcome
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; with no recorder installed
//!   every call is a cheap no-op
//! - Labels stay low-cardinality (policy name, outcome)

fn outcome(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "failure"
    }
}

/// Record one provider announcement seen by a registry listener.
pub fn record_announcement() {
    metrics::counter!("dapp_provider_announcements_total").increment(1);
}

/// Record an authorization attempt.
pub fn record_connection(success: bool) {
    metrics::counter!("dapp_connection_attempts_total", "outcome" => outcome(success)).increment(1);
}

/// Record a transaction submission.
pub fn record_submission(policy: &'static str, success: bool) {
    metrics::counter!(
        "dapp_transaction_submissions_total",
        "policy" => policy,
        "outcome" => outcome(success)
    )
    .increment(1);
}
