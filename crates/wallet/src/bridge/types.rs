use alloy_primitives::{Address, ChainId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::provider::EthereumRequest;

/// Provider call queued for the page, correlated by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeRequest {
    pub id: Uuid,
    #[serde(flatten)]
    pub request: EthereumRequest,
}

/// Result of a provider call executed by the page against the wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub id: Uuid,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Page handshake payload reporting provider presence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub installed: bool,
}

/// Events posted by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum PageEvent {
    /// The user clicked the connect/disconnect trigger.
    Toggle,
    AccountsChanged(Vec<Address>),
    ChainChanged(ChainId),
}

/// User-initiated actions surfaced to the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Toggle,
}

/// UI updates queued for the page to apply, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum UiUpdate {
    Status { message: String },
    Connected { address: Address },
    Disconnected,
    Network { id: String, name: String },
    Balance { value: String },
    HidePanels,
}

/// Response wrapper for bridge API communication.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct BridgeResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> BridgeResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn empty() -> Self {
        Self { success: true, data: None, error: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(message.into()) }
    }
}
