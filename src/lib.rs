// Library crate for the gameshow quiz server
// This file exposes the public API for integration tests

pub mod catalog;
pub mod config;
pub mod engine;
pub mod evaluator;
pub mod event;
pub mod play;
pub mod quiz;
mod remote;
pub mod shared;
pub mod timer;
pub mod websockets;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Re-export commonly used types for easier access in tests
pub use config::{AppConfig, CleanupConfig, ConfigError};
pub use engine::{Phase, SessionMachine, SessionSnapshot, SessionSummary};
pub use event::{EventBus, SessionEvent};
pub use play::{PlayHandle, PlayManager, SessionIntent};
pub use shared::{AppError, AppState};
pub use websockets::{MessageType, WebSocketMessage};

/// All HTTP and WebSocket routes of the server
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Gameshow quiz server" }))
        .route("/plays", post(play::handlers::create_play))
        .route(
            "/plays/:play_id",
            get(play::handlers::get_play).delete(play::handlers::delete_play),
        )
        .route("/plays/:play_id/start", post(play::handlers::start_play))
        .route("/plays/:play_id/select", post(play::handlers::select_option))
        .route("/plays/:play_id/advance", post(play::handlers::advance_play))
        .route("/plays/:play_id/restart", post(play::handlers::restart_play))
        .route("/plays/:play_id/summary", get(play::handlers::get_summary))
        .route("/plays/:play_id/ws", get(websockets::websocket_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
