use std::time::Duration;

/// Errors surfaced by wallet session operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// The provider capability is absent from the host environment.
    #[error("no wallet provider detected in the host environment")]
    ProviderUnavailable,

    /// The user or the provider declined the request.
    #[error("{operation} rejected: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },

    /// A network-info or balance query failed.
    #[error("{operation} request failed: {reason}")]
    Fetch {
        operation: &'static str,
        reason: String,
    },
}

impl WalletError {
    pub(crate) fn fetch(operation: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Fetch { operation, reason: reason.to_string() }
    }
}

/// Errors internal to the HTTP bridge.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("failed to bind the bridge server: {0}")]
    Bind(#[source] std::io::Error),

    #[error("the bridge server is not running")]
    NotRunning,

    /// The page executed the call and the wallet returned an error.
    #[error("{0}")]
    Provider(String),

    #[error("timed out after {0:?} waiting for the page")]
    Timeout(Duration),
}
