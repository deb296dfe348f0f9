use std::sync::Arc;

use alloy_primitives::{Address, ChainId};
use bellows_networks::format_chain_id;

use crate::{
    bridge::{state::BridgeState, types::UiUpdate},
    view::WalletView,
};

/// [`WalletView`] implementation that queues DOM updates for the wallet page.
///
/// The page applies each update with an existence check, so updates touching
/// panels that are absent from the markup degrade to no-ops.
#[derive(Clone)]
pub struct PageView {
    state: Arc<BridgeState>,
}

impl PageView {
    pub(crate) fn new(state: Arc<BridgeState>) -> Self {
        Self { state }
    }

    fn push(&self, update: UiUpdate) {
        self.state.push_ui_update(update);
    }
}

impl WalletView for PageView {
    fn set_status(&self, message: &str) {
        self.push(UiUpdate::Status { message: message.to_string() });
    }

    fn set_connected(&self, address: Address) {
        self.push(UiUpdate::Connected { address });
    }

    fn set_disconnected(&self) {
        self.push(UiUpdate::Disconnected);
    }

    fn update_network_info(&self, chain_id: ChainId, name: &str) {
        self.push(UiUpdate::Network { id: format_chain_id(chain_id), name: name.to_string() });
    }

    fn update_balance(&self, balance: &str) {
        self.push(UiUpdate::Balance { value: balance.to_string() });
    }

    fn hide_info_panels(&self) {
        self.push(UiUpdate::HidePanels);
    }
}
