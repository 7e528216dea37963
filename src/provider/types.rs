//! Request and error types shared by every provider.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// EIP-1193 method names issued by the dapp.
pub mod methods {
    /// Prompt the user for account access.
    pub const REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
    /// List accounts the page is already authorized for.
    pub const ACCOUNTS: &str = "eth_accounts";
    /// Sign and broadcast a transaction.
    pub const SEND_TRANSACTION: &str = "eth_sendTransaction";
    /// Fetch a receipt by transaction hash.
    pub const GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";
}

/// EIP-1193: the user rejected the request.
pub const USER_REJECTED_CODE: i64 = 4001;
/// EIP-1193: the method or account has not been authorized.
pub const UNAUTHORIZED_CODE: i64 = 4100;
/// EIP-1193: the provider does not support the method.
pub const UNSUPPORTED_METHOD_CODE: i64 = 4200;

/// Arguments of a single `request` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestArguments {
    /// JSON-RPC method name.
    pub method: String,

    /// Positional parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Value>,
}

impl RequestArguments {
    /// Create a request without parameters.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: Vec::new(),
        }
    }

    /// Create a request with positional parameters.
    pub fn with_params(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// Errors a provider can return from `request`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The user declined the prompt (code 4001).
    #[error("User rejected the request")]
    UserRejected,

    /// The page is not authorized for the method or account (code 4100).
    #[error("The requested method and/or account has not been authorized by the user")]
    Unauthorized,

    /// Any other JSON-RPC error response.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The provider could not be reached.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider answered with something the dapp cannot interpret.
    #[error("Invalid response to {method}: {reason}")]
    InvalidResponse { method: String, reason: String },
}

impl ProviderError {
    /// Map an EIP-1193 / JSON-RPC error code to a typed error.
    pub fn from_code(code: i64, message: impl Into<String>) -> Self {
        match code {
            USER_REJECTED_CODE => Self::UserRejected,
            UNAUTHORIZED_CODE => Self::Unauthorized,
            _ => Self::Rpc {
                code,
                message: message.into(),
            },
        }
    }

    /// Create an invalid-response error.
    pub fn invalid_response(method: &str, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            method: method.to_string(),
            reason: reason.into(),
        }
    }

    /// The numeric error code, when the failure came from the provider.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::UserRejected => Some(USER_REJECTED_CODE),
            Self::Unauthorized => Some(UNAUTHORIZED_CODE),
            Self::Rpc { code, .. } => Some(*code),
            Self::Transport(_) | Self::InvalidResponse { .. } => None,
        }
    }

    /// Whether the user explicitly declined.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::UserRejected)
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
