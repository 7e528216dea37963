//! Sequencing policies, steps, errors and the result log.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::provider::types::ProviderError;

/// How submissions are ordered within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencePolicy {
    /// Two submissions, the second only after the first returned and a
    /// receipt probe for it completed.
    Strict,
    /// Two submissions fired back to back without awaiting settlement.
    OverlappedPair,
    /// Three submissions fired with a pacing delay between them.
    OverlappedTriple,
}

impl SequencePolicy {
    /// Number of transactions the policy submits.
    pub fn submissions(&self) -> usize {
        match self {
            Self::Strict | Self::OverlappedPair => 2,
            Self::OverlappedTriple => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::OverlappedPair => "overlapped-2",
            Self::OverlappedTriple => "overlapped-3",
        }
    }
}

impl fmt::Display for SequencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SequencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "overlapped-2" => Ok(Self::OverlappedPair),
            "overlapped-3" => Ok(Self::OverlappedTriple),
            other => Err(format!(
                "unknown policy '{other}' (expected strict, overlapped-2 or overlapped-3)"
            )),
        }
    }
}

/// Position of a submission within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    First,
    Second,
    Third,
}

impl Step {
    /// Steps in submission order.
    pub const ALL: [Step; 3] = [Step::First, Step::Second, Step::Third];

    pub fn label(&self) -> &'static str {
        match self {
            Self::First => "First",
            Self::Second => "Second",
            Self::Third => "Third",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a run stopped early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// Triggered before any provider was connected.
    #[error("No provider selected")]
    NoProvider,

    /// The provider reported no authorized accounts.
    #[error("No accounts found")]
    NoAccounts,

    /// Fetching accounts failed.
    #[error("{0}")]
    Accounts(#[source] ProviderError),

    /// A transaction submission failed.
    #[error("{source}")]
    Submission {
        step: Step,
        #[source]
        source: ProviderError,
    },

    /// The receipt probe between strict submissions failed.
    #[error("{source}")]
    Probe {
        step: Step,
        #[source]
        source: ProviderError,
    },

    /// An in-flight submission task died before answering.
    #[error("{step} transaction task failed: {reason}")]
    Task { step: Step, reason: String },
}

impl SequenceError {
    /// Whether the run never got as far as submitting.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NoProvider | Self::NoAccounts | Self::Accounts(_))
    }

    /// The step the failure belongs to, if it happened mid-sequence.
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::Submission { step, .. } | Self::Probe { step, .. } | Self::Task { step, .. } => {
                Some(*step)
            }
            Self::NoProvider | Self::NoAccounts | Self::Accounts(_) => None,
        }
    }
}

/// One line of the result log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceEntry {
    /// A submission returned a hash.
    Sent { step: Step, tx_hash: String },
    /// The run stopped; always the last entry.
    Failed(SequenceError),
}

impl SequenceEntry {
    /// Human-readable status text for this entry.
    pub fn status_text(&self) -> String {
        match self {
            Self::Sent { step, tx_hash } => format!("{step} transaction sent: {tx_hash}"),
            Self::Failed(error) => format!("Error: {error}"),
        }
    }
}

/// Append-only log of a run, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceResult {
    entries: Vec<SequenceEntry>,
}

impl SequenceResult {
    pub(crate) fn push(&mut self, entry: SequenceEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[SequenceEntry] {
        &self.entries
    }

    /// Hashes of the successful submissions, in order.
    pub fn tx_hashes(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                SequenceEntry::Sent { tx_hash, .. } => Some(tx_hash.as_str()),
                SequenceEntry::Failed(_) => None,
            })
            .collect()
    }

    /// The error that ended the run, if any.
    pub fn error(&self) -> Option<&SequenceError> {
        match self.entries.last() {
            Some(SequenceEntry::Failed(error)) => Some(error),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error().is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!("strict".parse::<SequencePolicy>(), Ok(SequencePolicy::Strict));
        assert_eq!(
            "overlapped-3".parse::<SequencePolicy>().unwrap().submissions(),
            3
        );
        assert!("parallel".parse::<SequencePolicy>().is_err());
        assert_eq!(SequencePolicy::OverlappedPair.to_string(), "overlapped-2");
    }

    #[test]
    fn test_status_text() {
        let sent = SequenceEntry::Sent {
            step: Step::Second,
            tx_hash: "0x222".into(),
        };
        assert_eq!(sent.status_text(), "Second transaction sent: 0x222");

        let failed = SequenceEntry::Failed(SequenceError::Submission {
            step: Step::Second,
            source: ProviderError::UserRejected,
        });
        assert_eq!(failed.status_text(), "Error: User rejected the request");

        let failed = SequenceEntry::Failed(SequenceError::NoAccounts);
        assert_eq!(failed.status_text(), "Error: No accounts found");
    }

    #[test]
    fn test_result_accessors() {
        let mut result = SequenceResult::default();
        assert!(result.is_empty());
        result.push(SequenceEntry::Sent {
            step: Step::First,
            tx_hash: "0x111".into(),
        });
        assert!(result.is_success());

        result.push(SequenceEntry::Failed(SequenceError::Probe {
            step: Step::First,
            source: ProviderError::Transport("reset".into()),
        }));
        assert_eq!(result.tx_hashes(), vec!["0x111"]);
        assert_eq!(result.error().unwrap().step(), Some(Step::First));
        assert!(!result.error().unwrap().is_precondition());
        assert_eq!(result.len(), 2);
    }
}
