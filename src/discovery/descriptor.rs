//! Announced provider metadata.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::provider::request::ProviderHandle;

/// Provider metadata carried in an `announceProvider` event (EIP-6963 `info`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Identifier unique among concurrently announced providers.
    pub uuid: String,

    /// Human-readable wallet name.
    pub name: String,

    /// Icon as a URL or RFC 2397 data URI.
    pub icon: String,

    /// Reverse-DNS identifier of the wallet vendor.
    pub rdns: String,
}

impl ProviderInfo {
    /// Create metadata with an id and name; icon and rdns are left empty.
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            icon: String::new(),
            rdns: String::new(),
        }
    }

    /// Set the icon reference.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Set the reverse-DNS identifier.
    pub fn with_rdns(mut self, rdns: impl Into<String>) -> Self {
        self.rdns = rdns.into();
        self
    }

    /// The icon parsed as a URL, if it is one.
    pub fn icon_url(&self) -> Option<Url> {
        Url::parse(&self.icon).ok()
    }
}

/// One discoverable provider: metadata plus its request capability.
///
/// Immutable once announced. Identity is `unique_id`.
#[derive(Debug, Clone)]
pub struct ProviderDescriptor {
    info: ProviderInfo,
    provider: ProviderHandle,
}

impl ProviderDescriptor {
    /// Pair metadata with a provider handle.
    pub fn new(info: ProviderInfo, provider: ProviderHandle) -> Self {
        Self { info, provider }
    }

    pub fn unique_id(&self) -> &str {
        &self.info.uuid
    }

    pub fn display_name(&self) -> &str {
        &self.info.name
    }

    pub fn icon_ref(&self) -> &str {
        &self.info.icon
    }

    pub fn info(&self) -> &ProviderInfo {
        &self.info
    }

    /// The provider's request capability.
    pub fn provider(&self) -> &ProviderHandle {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_url() {
        let info = ProviderInfo::new("walletA", "Wallet A")
            .with_icon("data:image/png;base64,iVBORw0KGgo=")
            .with_rdns("io.wallet.a");
        assert_eq!(info.icon_url().unwrap().scheme(), "data");
        assert_eq!(info.rdns, "io.wallet.a");

        assert!(ProviderInfo::new("x", "X").icon_url().is_none());
    }

    #[test]
    fn test_info_wire_format() {
        let info: ProviderInfo = serde_json::from_str(
            r#"{"uuid":"350670db-19fa-4704-a166-e52e178b59d2","name":"Example Wallet","icon":"data:image/svg+xml,<svg/>","rdns":"com.example.wallet"}"#,
        )
        .unwrap();
        assert_eq!(info.name, "Example Wallet");
        assert_eq!(info.rdns, "com.example.wallet");
    }
}
