use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
    response::{Html, IntoResponse},
};
use tracing::trace;

use crate::bridge::{
    assets,
    state::BridgeState,
    types::{BridgeRequest, BridgeResponse, PageEvent, ProviderStatus, RpcResponse, UiUpdate},
};

const SESSION_TOKEN_PLACEHOLDER: &str = "{{SESSION_TOKEN}}";

/// Serves the embedded wallet page with the session token injected.
pub(crate) async fn serve_index(State(state): State<Arc<BridgeState>>) -> impl IntoResponse {
    let page =
        assets::contents::INDEX_HTML.replace(SESSION_TOKEN_PLACEHOLDER, state.session_token());
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/html; charset=utf-8"),
    );
    (headers, Html(page))
}

/// Page handshake: records whether `window.ethereum` is present.
pub(crate) async fn post_hello(
    State(state): State<Arc<BridgeState>>,
    Json(status): Json<ProviderStatus>,
) -> Json<BridgeResponse<()>> {
    trace!(target: "bellows::bridge", installed = status.installed, "page handshake");
    state.set_installed(status.installed);
    Json(BridgeResponse::empty())
}

/// Next provider call for the page to execute, if any.
pub(crate) async fn get_next_request(
    State(state): State<Arc<BridgeState>>,
) -> Json<BridgeResponse<BridgeRequest>> {
    match state.read_next_request() {
        Some(request) => Json(BridgeResponse::ok(request)),
        None => Json(BridgeResponse::error("No pending request")),
    }
}

/// Result of a provider call executed by the page.
pub(crate) async fn post_response(
    State(state): State<Arc<BridgeState>>,
    Json(response): Json<RpcResponse>,
) -> Json<BridgeResponse<()>> {
    if !state.has_request(&response.id) {
        return Json(BridgeResponse::error("Unknown request id"));
    }
    state.add_response(response);
    Json(BridgeResponse::empty())
}

/// Queued UI updates for the page to apply, in order.
pub(crate) async fn get_ui_updates(
    State(state): State<Arc<BridgeState>>,
) -> Json<BridgeResponse<Vec<UiUpdate>>> {
    Json(BridgeResponse::ok(state.drain_ui_updates()))
}

/// Event posted by the page: the user toggle or a wallet change event.
pub(crate) async fn post_event(
    State(state): State<Arc<BridgeState>>,
    Json(event): Json<PageEvent>,
) -> Json<BridgeResponse<()>> {
    state.dispatch_event(event);
    Json(BridgeResponse::empty())
}
