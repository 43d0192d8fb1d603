use async_trait::async_trait;
use axum::{
    extract::{Path, State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::messages::WebSocketMessage;
use super::socket::{Connection, MessageHandler, SocketWrapper};
use crate::play::PlayHandle;
use crate::shared::{AppError, AppState};

/// Turns client messages into intents for one play
pub struct PlayMessageHandler {
    play: PlayHandle,
}

impl PlayMessageHandler {
    pub fn new(play: PlayHandle) -> Self {
        Self { play }
    }
}

#[async_trait]
impl MessageHandler for PlayMessageHandler {
    async fn handle_message(&self, play_id: &str, message: String) -> Option<String> {
        debug!(play_id = %play_id, message = %message, "Received message");

        let intent = match serde_json::from_str::<WebSocketMessage>(&message)
            .map_err(|e| format!("Invalid message: {}", e))
            .and_then(WebSocketMessage::into_intent)
        {
            Ok(intent) => intent,
            Err(reason) => {
                warn!(play_id = %play_id, error = %reason, "Rejected WebSocket message");
                return Some(WebSocketMessage::error(reason).to_json());
            }
        };

        // The resulting snapshot reaches the client through the snapshot stream
        match self.play.dispatch(intent).await {
            Ok(_) => None,
            Err(e) => Some(WebSocketMessage::error(e.to_string()).to_json()),
        }
    }
}

/// WebSocket endpoint for a running play
///
/// GET /plays/:play_id/ws
#[instrument(skip(ws, state))]
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Path(play_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let play = state
        .play_manager
        .get_play(&play_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Play {} not found", play_id)))?;

    info!(play_id = %play_id, "WebSocket connection requested");
    Ok(ws.on_upgrade(move |socket| serve_connection(Box::new(socket), play)))
}

/// Drive one client connection until it or the play goes away
///
/// The client first receives the current snapshot and then a SNAPSHOT message
/// after every transition.
pub async fn serve_connection(socket: Box<dyn SocketWrapper>, play: PlayHandle) {
    let play_id = play.play_id().to_string();
    info!(play_id = %play_id, "WebSocket connection established");

    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();
    let mut snapshots = play.watch();

    let forwarder = tokio::spawn(async move {
        loop {
            let message = WebSocketMessage::snapshot(&snapshots.borrow_and_update()).to_json();
            if outbound_sender.send(message).is_err() {
                return;
            }
            if snapshots.changed().await.is_err() {
                debug!("Play stopped publishing snapshots");
                return;
            }
        }
    });

    let message_handler = Arc::new(PlayMessageHandler::new(play));
    let connection = Connection::new(
        play_id.clone(),
        socket,
        outbound_receiver,
        message_handler,
    );

    match connection.run().await {
        Ok(()) => info!(play_id = %play_id, "WebSocket connection closed cleanly"),
        Err(e) => warn!(play_id = %play_id, error = %e, "WebSocket connection error"),
    }

    forwarder.abort();
}
