//! Connection errors.

use thiserror::Error;

use crate::provider::types::ProviderError;

/// Authorization failed; the previous connection state is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to connect to provider {provider}: {source}")]
pub struct AuthorizationError {
    /// Unique id of the provider that was asked.
    pub provider: String,

    /// What the provider answered.
    #[source]
    pub source: ProviderError,
}

impl AuthorizationError {
    pub(crate) fn new(provider: impl Into<String>, source: ProviderError) -> Self {
        Self {
            provider: provider.into(),
            source,
        }
    }

    /// Whether the user declined the prompt (as opposed to a provider fault).
    pub fn is_user_rejection(&self) -> bool {
        self.source.is_user_rejection()
    }
}
