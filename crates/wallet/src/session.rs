use std::sync::Arc;

use alloy_primitives::{Address, ChainId};
use bellows_networks::network_name;
use tracing::{debug, warn};

use crate::{
    connection::ConnectionController,
    provider::{WalletEvent, WalletProvider},
    units::format_balance,
    view::WalletView,
};

/// Network the session is currently on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkInfo {
    pub chain_id: ChainId,
    pub name: String,
}

/// In-memory record of the current wallet session.
///
/// Lives for the duration of the page; reset to all-absent on disconnect or
/// when the provider reports an empty account list.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub account: Option<Address>,
    pub network: Option<NetworkInfo>,
}

/// Drives the wallet session: sequences provider calls, folds provider-emitted
/// events into [`Session`] transitions, and pushes the results to the view.
///
/// Connection is the only operation that blocks on success or failure.
/// Network-info and balance fetches are best effort: a failure is logged and
/// the displayed state stays last-known-good.
pub struct SessionOrchestrator<P: ?Sized, V> {
    controller: ConnectionController<P>,
    provider: Arc<P>,
    view: V,
    session: Session,
}

impl<P: WalletProvider + ?Sized, V: WalletView> SessionOrchestrator<P, V> {
    pub fn new(provider: Arc<P>, view: V) -> Self {
        Self {
            controller: ConnectionController::new(provider.clone()),
            provider,
            view,
            session: Session::default(),
        }
    }

    /// Pushes the initial status and reports whether the provider is
    /// installed. When it is not, callers should skip event pumping; the
    /// page stays in the unavailable state.
    pub fn initialize(&mut self) -> bool {
        if self.controller.is_installed() {
            self.view.set_status("Wallet detected. Ready to connect.");
            true
        } else {
            self.view.set_status(
                "No wallet provider detected. Install a browser wallet to use this page.",
            );
            false
        }
    }

    /// Current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether an account is currently connected.
    pub fn is_connected(&self) -> bool {
        self.session.account.is_some()
    }

    /// Handles the user-initiated connect/disconnect toggle.
    pub async fn toggle_connection(&mut self) {
        if self.is_connected() {
            self.disconnect();
        } else {
            self.connect().await;
        }
    }

    async fn connect(&mut self) {
        match self.controller.connect().await {
            Ok(address) => {
                self.session.account = Some(address);
                self.view.set_connected(address);
                // Sequential on purpose: the balance fetch must observe the
                // account that was just set.
                self.refresh_network_info().await;
                self.refresh_balance().await;
            }
            Err(err) => {
                debug!(target: "bellows::session", %err, "connect failed");
                self.view.set_status(&format!("Failed to connect: {err}"));
            }
        }
    }

    fn disconnect(&mut self) {
        self.controller.disconnect();
        self.session = Session::default();
        self.view.set_disconnected();
        self.view.hide_info_panels();
    }

    /// Folds a provider-emitted event into the session.
    pub async fn handle_event(&mut self, event: WalletEvent) {
        match event {
            WalletEvent::AccountsChanged(accounts) => self.handle_accounts_changed(accounts).await,
            WalletEvent::ChainChanged(chain_id) => self.handle_chain_changed(chain_id).await,
        }
    }

    /// `accountsChanged`: an empty list means the user disconnected from the
    /// wallet side; otherwise the first entry becomes the active account.
    pub async fn handle_accounts_changed(&mut self, accounts: Vec<Address>) {
        match accounts.first() {
            None => self.disconnect(),
            Some(&account) => {
                self.session.account = Some(account);
                self.view.set_connected(account);
                self.refresh_balance().await;
            }
        }
    }

    /// `chainChanged`: replaces the network info wholesale and, if an account
    /// is connected, refreshes its balance on the new network.
    pub async fn handle_chain_changed(&mut self, chain_id: ChainId) {
        self.apply_network(chain_id);
        if self.is_connected() {
            self.refresh_balance().await;
        }
    }

    async fn refresh_network_info(&mut self) {
        match self.provider.chain_id().await {
            Ok(chain_id) => self.apply_network(chain_id),
            Err(err) => {
                warn!(target: "bellows::session", %err, "failed to fetch network info");
            }
        }
    }

    fn apply_network(&mut self, chain_id: ChainId) {
        let name = network_name(chain_id).into_owned();
        self.view.update_network_info(chain_id, &name);
        self.session.network = Some(NetworkInfo { chain_id, name });
    }

    async fn refresh_balance(&mut self) {
        let Some(account) = self.session.account else { return };
        match self.provider.get_balance(account).await {
            Ok(wei) => self.view.update_balance(&format_balance(wei)),
            Err(err) => {
                warn!(target: "bellows::session", %err, "failed to fetch balance");
            }
        }
    }
}
