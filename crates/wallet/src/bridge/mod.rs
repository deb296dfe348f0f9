//! Local HTTP bridge between the orchestrator and an injected browser wallet.
//!
//! The bridge serves a single embedded page on localhost:
//! 1. The page connects to the injected wallet via `window.ethereum` and
//!    reports its presence in a handshake.
//! 2. Provider calls issued on the Rust side are queued; the page polls,
//!    executes them against the wallet, and posts results back.
//! 3. Wallet change events and the user's connect toggle travel from the page
//!    to the host over the same API, and queued UI updates travel back.
//!
//! All `/api` routes require a per-server session token which is injected
//! into the served page.

mod assets;
mod handlers;
mod page_view;
mod queue;
mod router;
mod server;
mod state;
mod types;

pub use page_view::PageView;
pub use server::{BridgeProvider, BridgeServer};
pub use types::{BridgeRequest, PageEvent, RpcResponse, UiUpdate, UserAction};

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use alloy_primitives::{Address, U256, address};
    use serde_json::json;
    use tokio::task::JoinHandle;
    use uuid::Uuid;

    use crate::{
        bridge::{
            BridgeRequest, BridgeServer, UiUpdate, UserAction,
            types::BridgeResponse,
        },
        error::{BridgeError, WalletError},
        provider::{EthereumRequest, WalletEvent, WalletProvider},
        view::WalletView,
    };

    const ALICE: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    async fn start_server() -> (BridgeServer, reqwest::Client) {
        let mut server = BridgeServer::new(0, false, Duration::from_secs(2));
        server.start().await.unwrap();

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("X-Session-Token", server.session_token().parse().unwrap());
        let client = reqwest::Client::builder().default_headers(headers).build().unwrap();
        (server, client)
    }

    fn api(server: &BridgeServer, path: &str) -> String {
        format!("http://localhost:{}/api{path}", server.port())
    }

    /// Polls the request endpoint once, as the page would.
    async fn next_request(
        client: &reqwest::Client,
        server: &BridgeServer,
    ) -> Option<BridgeRequest> {
        let resp: BridgeResponse<BridgeRequest> =
            client.get(api(server, "/request")).send().await.unwrap().json().await.unwrap();
        resp.data
    }

    /// Spawns a provider call and gives the server a moment to queue it.
    async fn spawn_call<F, T>(call: F) -> JoinHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let handle = tokio::spawn(call);
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle
    }

    #[tokio::test]
    async fn setup_server() {
        let (mut server, client) = start_server().await;
        assert_ne!(server.port(), 0);
        assert!(!server.open_browser());
        assert_eq!(server.timeout(), Duration::from_secs(2));

        // The request queue starts empty.
        let resp: BridgeResponse<BridgeRequest> =
            client.get(api(&server, "/request")).send().await.unwrap().json().await.unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("No pending request"));

        server.stop().await.unwrap();
        assert!(matches!(server.stop().await, Err(BridgeError::NotRunning)));
    }

    #[tokio::test]
    async fn index_page_embeds_session_token() {
        let (mut server, _client) = start_server().await;

        let body = reqwest::get(server.url()).await.unwrap().text().await.unwrap();
        assert!(body.contains(server.session_token()));
        assert!(body.contains("connectButton"));

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn api_requires_session_token() {
        let (mut server, _client) = start_server().await;

        let resp = reqwest::get(api(&server, "/request")).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::FORBIDDEN);

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn handshake_reports_provider_presence() {
        let (mut server, client) = start_server().await;
        let provider = server.provider();
        assert!(!provider.is_installed());

        client
            .post(api(&server, "/hello"))
            .json(&json!({ "installed": true }))
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap();

        assert!(server.wait_until_ready().await.unwrap());
        assert!(provider.is_installed());

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn request_accounts_round_trip() {
        let (mut server, client) = start_server().await;
        let provider = server.provider();

        let handle = spawn_call(async move { provider.request_accounts().await }).await;

        let request = next_request(&client, &server).await.expect("expected a pending request");
        assert_eq!(request.request, EthereumRequest::RequestAccounts);

        client
            .post(api(&server, "/response"))
            .json(&json!({ "id": request.id, "result": [ALICE], "error": null }))
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap();

        let accounts = handle.await.expect("task panicked").expect("expected accounts");
        assert_eq!(accounts, vec![ALICE]);

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn rejected_connect_surfaces_reason() {
        let (mut server, client) = start_server().await;
        let provider = server.provider();

        let handle = spawn_call(async move { provider.request_accounts().await }).await;

        let request = next_request(&client, &server).await.expect("expected a pending request");
        client
            .post(api(&server, "/response"))
            .json(&json!({ "id": request.id, "result": null, "error": "User rejected the request" }))
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap();

        let res = handle.await.expect("task panicked");
        match res {
            Err(WalletError::Rejected { operation, reason }) => {
                assert_eq!(operation, "connect");
                assert_eq!(reason, "User rejected the request");
            }
            other => panic!("expected rejection, got {other:?}"),
        }

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn balance_round_trip() {
        let (mut server, client) = start_server().await;
        let provider = server.provider();

        let handle = spawn_call(async move { provider.get_balance(ALICE).await }).await;

        let request = next_request(&client, &server).await.expect("expected a pending request");
        match &request.request {
            EthereumRequest::GetBalance(address, tag) => {
                assert_eq!(*address, ALICE);
                assert_eq!(tag, "latest");
            }
            other => panic!("expected a balance request, got {other:?}"),
        }

        client
            .post(api(&server, "/response"))
            .json(&json!({ "id": request.id, "result": "0xde0b6b3a7640000" }))
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap();

        let balance = handle.await.expect("task panicked").expect("expected a balance");
        assert_eq!(balance, U256::from(1_000_000_000_000_000_000_u64));

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn chain_id_round_trip() {
        let (mut server, client) = start_server().await;
        let provider = server.provider();

        let handle = spawn_call(async move { provider.chain_id().await }).await;

        let request = next_request(&client, &server).await.expect("expected a pending request");
        assert_eq!(request.request, EthereumRequest::ChainId);

        client
            .post(api(&server, "/response"))
            .json(&json!({ "id": request.id, "result": "0xa4b1" }))
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap();

        let chain_id = handle.await.expect("task panicked").expect("expected a chain id");
        assert_eq!(chain_id, 42161);

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn unknown_response_id_is_rejected() {
        let (mut server, client) = start_server().await;

        let resp: BridgeResponse<()> = client
            .post(api(&server, "/response"))
            .json(&json!({ "id": Uuid::new_v4(), "result": null, "error": null }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("Unknown request id"));

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn malformed_response_is_unprocessable() {
        let (mut server, client) = start_server().await;

        let resp = client
            .post(api(&server, "/response"))
            .header("Content-Type", "application/json")
            .body(r#"{ "id": "not-a-uuid", "result": null, "error": null }"#)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn page_events_reach_the_channels() {
        let (mut server, client) = start_server().await;
        let provider = server.provider();
        let mut events = provider.take_events().expect("events stream");
        let mut actions = server.take_actions().expect("actions stream");

        for body in [
            json!({ "event": "toggle" }),
            json!({ "event": "accountsChanged", "data": [ALICE] }),
            json!({ "event": "chainChanged", "data": 1 }),
        ] {
            client
                .post(api(&server, "/event"))
                .json(&body)
                .send()
                .await
                .unwrap()
                .error_for_status()
                .unwrap();
        }

        assert_eq!(actions.recv().await, Some(UserAction::Toggle));
        assert_eq!(events.recv().await, Some(WalletEvent::AccountsChanged(vec![ALICE])));
        assert_eq!(events.recv().await, Some(WalletEvent::ChainChanged(1)));

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn ui_updates_drain_in_order() {
        let (mut server, client) = start_server().await;
        let view = server.view();

        view.set_status("Wallet detected. Ready to connect.");
        view.set_connected(ALICE);
        view.update_balance("1.0000");

        let resp: BridgeResponse<Vec<UiUpdate>> =
            client.get(api(&server, "/ui")).send().await.unwrap().json().await.unwrap();
        let updates = resp.data.expect("expected queued updates");
        assert_eq!(
            updates,
            vec![
                UiUpdate::Status { message: "Wallet detected. Ready to connect.".to_string() },
                UiUpdate::Connected { address: ALICE },
                UiUpdate::Balance { value: "1.0000".to_string() },
            ]
        );

        // A second poll finds the queue empty.
        let resp: BridgeResponse<Vec<UiUpdate>> =
            client.get(api(&server, "/ui")).send().await.unwrap().json().await.unwrap();
        assert_eq!(resp.data, Some(Vec::new()));

        server.stop().await.unwrap();
    }
}
