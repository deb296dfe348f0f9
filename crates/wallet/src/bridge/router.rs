use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::bridge::{handlers, state::BridgeState};

pub(crate) fn build_router(state: Arc<BridgeState>) -> Router {
    let api = Router::new()
        .route("/hello", post(handlers::post_hello))
        .route("/request", get(handlers::get_next_request))
        .route("/response", post(handlers::post_response))
        .route("/ui", get(handlers::get_ui_updates))
        .route("/event", post(handlers::post_event))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session_token));

    Router::new()
        .route("/", get(handlers::serve_index))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn require_session_token(
    State(state): State<Arc<BridgeState>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let ok = req
        .headers()
        .get("X-Session-Token")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == state.session_token())
        .unwrap_or(false);

    if !ok {
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(req).await)
}
