use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    Json, Router,
    extract::{State, WebSocketUpgrade},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use common::games::tictactoe::{GameSnapshot, TicTacToeCommand};
use common::log;
use tokio::sync::mpsc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::broadcaster::ClientBroadcaster;
use crate::ws_handler::handle_websocket;

#[derive(Clone)]
pub struct WebServerState {
    pub broadcaster: ClientBroadcaster,
    pub command_tx: mpsc::UnboundedSender<TicTacToeCommand>,
}

pub fn build_router(state: WebServerState, static_files_path: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/ws", get(ws_upgrade_handler))
        .route("/api/state", get(state_handler));

    if let Some(path) = static_files_path {
        log!("Serving static files from {}", path.display());
        router = router.nest_service("/ui", ServeDir::new(path));
    }

    router.layer(cors).with_state(state)
}

pub async fn run_web_server(
    addr: SocketAddr,
    state: WebServerState,
    static_files_path: Option<PathBuf>,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), String> {
    let app = build_router(state, static_files_path);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind web server address {}: {}", addr, e))?;
    log!("Web server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Web server error: {}", e))
}

async fn ws_upgrade_handler(
    ws: WebSocketUpgrade,
    State(state): State<WebServerState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

async fn state_handler(
    State(state): State<WebServerState>,
) -> Result<Json<GameSnapshot>, StatusCode> {
    state
        .broadcaster
        .latest_snapshot()
        .await
        .map(Json)
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)
}
