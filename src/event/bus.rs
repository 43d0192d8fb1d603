use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use super::events::SessionEvent;

const PLAY_CHANNEL_CAPACITY: usize = 100;

/// Fan-out of session events, one broadcast channel per play
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    /// play_id -> sender
    play_channels: Arc<RwLock<HashMap<String, broadcast::Sender<SessionEvent>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit an event to every subscriber of its play
    pub async fn emit(&self, event: SessionEvent) {
        let play_id = event.play_id().to_string();
        self.emit_to_play(&play_id, event).await;
    }

    /// Emit to the channel of `play_id`; plays nobody subscribed to get no channel
    pub async fn emit_to_play(&self, play_id: &str, event: SessionEvent) {
        let event_type = event.event_type();
        let Some(sender) = self.play_channels.read().await.get(play_id).cloned() else {
            debug!(
                play_id = %play_id,
                event_type = event_type,
                "Play event dropped, no channel"
            );
            return;
        };

        match sender.send(event) {
            Ok(receiver_count) => {
                debug!(
                    play_id = %play_id,
                    event_type = event_type,
                    receivers = receiver_count,
                    "Play event emitted"
                );
            }
            Err(_) => {
                debug!(
                    play_id = %play_id,
                    event_type = event_type,
                    "Play event emitted with no receivers"
                );
            }
        }
    }

    /// Subscribe to events for a specific play
    pub async fn subscribe_to_play(&self, play_id: &str) -> broadcast::Receiver<SessionEvent> {
        self.sender_for(play_id).await.subscribe()
    }

    /// Drop the channel of a play; existing receivers see the stream close
    pub async fn remove_play(&self, play_id: &str) {
        if self.play_channels.write().await.remove(play_id).is_some() {
            debug!(play_id = %play_id, "Play channel removed");
        }
    }

    pub async fn channel_count(&self) -> usize {
        self.play_channels.read().await.len()
    }

    async fn sender_for(&self, play_id: &str) -> broadcast::Sender<SessionEvent> {
        if let Some(sender) = self.play_channels.read().await.get(play_id) {
            return sender.clone();
        }

        debug!(play_id = %play_id, "Creating play channel");
        let mut play_channels = self.play_channels.write().await;
        play_channels
            .entry(play_id.to_string())
            .or_insert_with(|| broadcast::channel(PLAY_CHANNEL_CAPACITY).0)
            .clone()
    }
}
