use alloy_primitives::{Address, ChainId, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::WalletError;

/// Block tag used for balance queries.
const LATEST_BLOCK: &str = "latest";

/// Standard EIP-1193 provider requests understood by the wallet page.
/// Reference: <https://eips.ethereum.org/EIPS/eip-1193>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum EthereumRequest {
    #[serde(rename = "eth_requestAccounts")]
    RequestAccounts,

    #[serde(rename = "eth_chainId")]
    ChainId,

    #[serde(rename = "eth_getBalance")]
    GetBalance(Address, String),
}

impl EthereumRequest {
    /// Balance query for `address` at the latest block.
    pub fn balance_of(address: Address) -> Self {
        Self::GetBalance(address, LATEST_BLOCK.to_string())
    }
}

/// Change events emitted by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum WalletEvent {
    /// The set of exposed accounts changed. An empty list means the user
    /// disconnected the wallet from the page.
    AccountsChanged(Vec<Address>),
    /// The selected network changed.
    ChainChanged(ChainId),
}

/// Capability surface of an injected wallet provider.
///
/// Implementations resolve each call against the underlying wallet; the
/// [`bridge`](crate::bridge) implementation relays them to `window.ethereum`
/// in the served page.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Whether the provider capability is present in the host environment.
    /// Pure query, no side effects.
    fn is_installed(&self) -> bool;

    /// Requests account access. May prompt the user and suspends until the
    /// provider resolves or rejects.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Queries the currently selected chain id.
    async fn chain_id(&self) -> Result<ChainId, WalletError>;

    /// Queries the balance of `address` at the latest block, in wei.
    async fn get_balance(&self, address: Address) -> Result<U256, WalletError>;

    /// Takes the stream of provider-emitted change events.
    ///
    /// The stream is handed out once; a single orchestrator drives each
    /// provider instance.
    fn take_events(&self) -> Option<mpsc::UnboundedReceiver<WalletEvent>>;
}
