use std::sync::Arc;

use alloy_primitives::Address;

use crate::{error::WalletError, provider::WalletProvider};

/// Thin wrapper around the provider for connection lifecycle calls.
pub struct ConnectionController<P: ?Sized> {
    provider: Arc<P>,
}

impl<P: WalletProvider + ?Sized> ConnectionController<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// True iff the provider capability is present.
    pub fn is_installed(&self) -> bool {
        self.provider.is_installed()
    }

    /// Requests account access and returns the first connected address.
    ///
    /// Suspends until the user responds or the provider resolves/rejects.
    pub async fn connect(&self) -> Result<Address, WalletError> {
        if !self.is_installed() {
            return Err(WalletError::ProviderUnavailable);
        }
        let accounts = self.provider.request_accounts().await?;
        accounts.first().copied().ok_or_else(|| WalletError::Rejected {
            operation: "connect",
            reason: "provider returned no accounts".to_string(),
        })
    }

    /// No-op: wallet providers offer no programmatic session termination.
    /// Callers discard local session state instead.
    pub fn disconnect(&self) {}
}
