use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::trace;
use uuid::Uuid;

use crate::{
    bridge::{
        queue::RequestQueue,
        types::{BridgeRequest, PageEvent, RpcResponse, UiUpdate, UserAction},
    },
    provider::WalletEvent,
};

/// Shared state behind the bridge API.
#[derive(Debug)]
pub(crate) struct BridgeState {
    /// Whether the page reported an injected provider. `None` until the page
    /// handshake arrives.
    installed: Mutex<Option<bool>>,
    /// Request/response queue for provider calls relayed to the page.
    rpc: Mutex<RequestQueue<BridgeRequest, RpcResponse>>,
    /// UI updates waiting for the page to apply them.
    ui: Mutex<VecDeque<UiUpdate>>,
    /// Token required on every `/api` call.
    session_token: String,
    /// Wallet change events, towards the orchestrator.
    events_tx: mpsc::UnboundedSender<WalletEvent>,
    events_rx: Mutex<Option<mpsc::UnboundedReceiver<WalletEvent>>>,
    /// User actions (the connect toggle), towards the host loop.
    actions_tx: mpsc::UnboundedSender<UserAction>,
    actions_rx: Mutex<Option<mpsc::UnboundedReceiver<UserAction>>>,
}

impl BridgeState {
    pub fn new(session_token: String) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (actions_tx, actions_rx) = mpsc::unbounded_channel();
        Self {
            installed: Mutex::new(None),
            rpc: Mutex::new(RequestQueue::new()),
            ui: Mutex::new(VecDeque::new()),
            session_token,
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
            actions_tx,
            actions_rx: Mutex::new(Some(actions_rx)),
        }
    }

    pub fn session_token(&self) -> &str {
        &self.session_token
    }

    pub fn set_installed(&self, installed: bool) {
        *self.installed.lock() = Some(installed);
    }

    /// Provider presence as reported by the page, if the handshake arrived.
    pub fn installed(&self) -> Option<bool> {
        *self.installed.lock()
    }

    pub fn is_installed(&self) -> bool {
        self.installed().unwrap_or(false)
    }

    pub fn add_request(&self, request: BridgeRequest) {
        self.rpc.lock().add_request(request.id, request);
    }

    pub fn has_request(&self, id: &Uuid) -> bool {
        self.rpc.lock().has_request(id)
    }

    pub fn read_next_request(&self) -> Option<BridgeRequest> {
        self.rpc.lock().read_request().cloned()
    }

    pub fn remove_request(&self, id: &Uuid) {
        self.rpc.lock().remove_request(id);
    }

    /// Records a response and retires the matching request.
    pub fn add_response(&self, response: RpcResponse) {
        let id = response.id;
        let mut rpc = self.rpc.lock();
        rpc.add_response(id, response);
        rpc.remove_request(&id);
    }

    pub fn take_response(&self, id: &Uuid) -> Option<RpcResponse> {
        self.rpc.lock().take_response(id)
    }

    pub fn push_ui_update(&self, update: UiUpdate) {
        self.ui.lock().push_back(update);
    }

    pub fn drain_ui_updates(&self) -> Vec<UiUpdate> {
        self.ui.lock().drain(..).collect()
    }

    /// Routes a page event to the matching channel. Dropped receivers are
    /// fine: the host may have shut its loop down already.
    pub fn dispatch_event(&self, event: PageEvent) {
        trace!(target: "bellows::bridge", ?event, "page event");
        match event {
            PageEvent::Toggle => {
                let _ = self.actions_tx.send(UserAction::Toggle);
            }
            PageEvent::AccountsChanged(accounts) => {
                let _ = self.events_tx.send(WalletEvent::AccountsChanged(accounts));
            }
            PageEvent::ChainChanged(chain_id) => {
                let _ = self.events_tx.send(WalletEvent::ChainChanged(chain_id));
            }
        }
    }

    pub fn take_events(&self) -> Option<mpsc::UnboundedReceiver<WalletEvent>> {
        self.events_rx.lock().take()
    }

    pub fn take_actions(&self) -> Option<mpsc::UnboundedReceiver<UserAction>> {
        self.actions_rx.lock().take()
    }
}
