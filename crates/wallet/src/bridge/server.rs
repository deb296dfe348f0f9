use std::{net::SocketAddr, sync::Arc, time::Duration};

use alloy_primitives::{Address, ChainId, U64, U256};
use async_trait::async_trait;
use tokio::{
    net::TcpListener,
    sync::{mpsc, oneshot},
    task::JoinHandle,
    time,
};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::{
    bridge::{
        page_view::PageView,
        router::build_router,
        state::BridgeState,
        types::{BridgeRequest, UserAction},
    },
    error::{BridgeError, WalletError},
    provider::{EthereumRequest, WalletEvent, WalletProvider},
};

/// Poll interval for response and handshake waits.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Local HTTP server bridging the orchestrator and the wallet page.
pub struct BridgeServer {
    port: u16,
    open_browser: bool,
    timeout: Duration,
    state: Arc<BridgeState>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl BridgeServer {
    /// Creates a server that will bind `port` on localhost (0 picks an
    /// ephemeral port). `timeout` bounds the page handshake and each
    /// relayed provider call.
    pub fn new(port: u16, open_browser: bool, timeout: Duration) -> Self {
        let session_token = Uuid::new_v4().to_string();
        Self {
            port,
            open_browser,
            timeout,
            state: Arc::new(BridgeState::new(session_token)),
            shutdown: None,
            handle: None,
        }
    }

    /// The bound port. Reflects the actual port once [`start`](Self::start)
    /// has returned.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// URL of the served wallet page.
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn open_browser(&self) -> bool {
        self.open_browser
    }

    #[cfg(test)]
    pub(crate) fn session_token(&self) -> &str {
        self.state.session_token()
    }

    /// Binds the listener and spawns the server task.
    pub async fn start(&mut self) -> Result<(), BridgeError> {
        let addr = SocketAddr::from(([127, 0, 0, 1], self.port));
        let listener = TcpListener::bind(addr).await.map_err(BridgeError::Bind)?;
        self.port = listener.local_addr().map_err(BridgeError::Bind)?.port();

        let router = build_router(self.state.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown = Some(shutdown_tx);
        self.handle = Some(tokio::spawn(async move {
            let serve = axum::serve(listener, router).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });
            if let Err(err) = serve.await {
                debug!(target: "bellows::bridge", %err, "bridge server stopped");
            }
        }));

        debug!(target: "bellows::bridge", url = %self.url(), "bridge server started");
        if self.open_browser {
            open_in_browser(&self.url());
        }
        Ok(())
    }

    /// Signals the server to shut down and waits for the task to finish.
    pub async fn stop(&mut self) -> Result<(), BridgeError> {
        let Some(shutdown) = self.shutdown.take() else {
            return Err(BridgeError::NotRunning);
        };
        let _ = shutdown.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
        Ok(())
    }

    /// Waits until the page has loaded and reported provider presence.
    /// Returns whether an injected provider is present.
    pub async fn wait_until_ready(&self) -> Result<bool, BridgeError> {
        let deadline = time::Instant::now() + self.timeout;
        loop {
            if let Some(installed) = self.state.installed() {
                return Ok(installed);
            }
            if time::Instant::now() >= deadline {
                return Err(BridgeError::Timeout(self.timeout));
            }
            time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Provider handle backed by this server.
    pub fn provider(&self) -> BridgeProvider {
        BridgeProvider { state: self.state.clone(), timeout: self.timeout }
    }

    /// View handle that queues UI updates for the page.
    pub fn view(&self) -> PageView {
        PageView::new(self.state.clone())
    }

    /// Takes the stream of user actions posted by the page.
    pub fn take_actions(&self) -> Option<mpsc::UnboundedReceiver<UserAction>> {
        self.state.take_actions()
    }
}

/// Best effort; a failure only means the user opens the page manually.
fn open_in_browser(url: &str) {
    let result = if cfg!(target_os = "macos") {
        std::process::Command::new("open").arg(url).spawn()
    } else if cfg!(target_os = "windows") {
        std::process::Command::new("cmd").args(["/C", "start", url]).spawn()
    } else {
        std::process::Command::new("xdg-open").arg(url).spawn()
    };
    if let Err(err) = result {
        debug!(target: "bellows::bridge", %err, "failed to open a browser");
    }
}

/// [`WalletProvider`] implementation that relays calls to the wallet page.
#[derive(Clone)]
pub struct BridgeProvider {
    state: Arc<BridgeState>,
    timeout: Duration,
}

impl BridgeProvider {
    /// Queues `request` for the page and polls for its response until the
    /// configured timeout.
    async fn dispatch(&self, request: EthereumRequest) -> Result<serde_json::Value, BridgeError> {
        let id = Uuid::new_v4();
        trace!(target: "bellows::bridge", %id, ?request, "dispatching provider call");
        self.state.add_request(BridgeRequest { id, request });

        let deadline = time::Instant::now() + self.timeout;
        loop {
            if let Some(response) = self.state.take_response(&id) {
                return match response.error {
                    Some(reason) => Err(BridgeError::Provider(reason)),
                    None => Ok(response.result.unwrap_or(serde_json::Value::Null)),
                };
            }
            if time::Instant::now() >= deadline {
                self.state.remove_request(&id);
                return Err(BridgeError::Timeout(self.timeout));
            }
            time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl WalletProvider for BridgeProvider {
    fn is_installed(&self) -> bool {
        self.state.is_installed()
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let value =
            self.dispatch(EthereumRequest::RequestAccounts).await.map_err(|err| match err {
                BridgeError::Provider(reason) => {
                    WalletError::Rejected { operation: "connect", reason }
                }
                other => WalletError::fetch("connect", other),
            })?;
        serde_json::from_value(value).map_err(|err| WalletError::fetch("connect", err))
    }

    async fn chain_id(&self) -> Result<ChainId, WalletError> {
        let value = self
            .dispatch(EthereumRequest::ChainId)
            .await
            .map_err(|err| WalletError::fetch("chain id", err))?;
        let id: U64 =
            serde_json::from_value(value).map_err(|err| WalletError::fetch("chain id", err))?;
        Ok(id.to::<u64>())
    }

    async fn get_balance(&self, address: Address) -> Result<U256, WalletError> {
        let value = self
            .dispatch(EthereumRequest::balance_of(address))
            .await
            .map_err(|err| WalletError::fetch("balance", err))?;
        serde_json::from_value(value).map_err(|err| WalletError::fetch("balance", err))
    }

    fn take_events(&self) -> Option<mpsc::UnboundedReceiver<WalletEvent>> {
        self.state.take_events()
    }
}
