use alloy_primitives::{Address, ChainId};

/// Sink for UI state pushed by the session orchestrator.
///
/// Every method must be a safe no-op when the corresponding UI element does
/// not exist; the orchestrator never fails because a panel is missing from
/// the markup.
pub trait WalletView {
    /// Replaces the status line text.
    fn set_status(&self, message: &str);

    /// Switches the page into the connected state for `address`.
    fn set_connected(&self, address: Address);

    /// Switches the page into the disconnected state.
    fn set_disconnected(&self);

    /// Reveals and fills the network panel.
    fn update_network_info(&self, chain_id: ChainId, name: &str);

    /// Reveals and fills the balance panel. `balance` is already formatted
    /// for display.
    fn update_balance(&self, balance: &str);

    /// Hides the network and account panels.
    fn hide_info_panels(&self);
}

/// View that discards every update.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullView;

impl WalletView for NullView {
    fn set_status(&self, _message: &str) {}
    fn set_connected(&self, _address: Address) {}
    fn set_disconnected(&self) {}
    fn update_network_info(&self, _chain_id: ChainId, _name: &str) {}
    fn update_balance(&self, _balance: &str) {}
    fn hide_info_panels(&self) {}
}
