use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::driver::{spawn_play, DriverConfig, PlayHandle};
use crate::catalog::{GameCatalog, PlayMode};
use crate::evaluator::AnswerEvaluator;
use crate::event::EventBus;
use crate::quiz::{LoadError, QuizRules};

struct PlayEntry {
    handle: PlayHandle,
    game_id: String,
}

/// Registry of running plays
///
/// Creating a play loads its game, applies the quiz rules and spawns a driver.
/// Removing a play stops its driver.
#[derive(Clone)]
pub struct PlayManager {
    plays: Arc<RwLock<HashMap<String, PlayEntry>>>,
    catalog: Arc<dyn GameCatalog>,
    evaluator: Arc<dyn AnswerEvaluator>,
    event_bus: EventBus,
    rules: QuizRules,
    driver_config: DriverConfig,
}

impl PlayManager {
    pub fn new(
        catalog: Arc<dyn GameCatalog>,
        evaluator: Arc<dyn AnswerEvaluator>,
        event_bus: EventBus,
        rules: QuizRules,
        driver_config: DriverConfig,
    ) -> Self {
        Self {
            plays: Arc::new(RwLock::new(HashMap::new())),
            catalog,
            evaluator,
            event_bus,
            rules,
            driver_config,
        }
    }

    /// Load a game and start a new play for it
    #[instrument(skip(self))]
    pub async fn create_play(&self, game_id: &str, mode: PlayMode) -> Result<PlayHandle, LoadError> {
        let game = self.catalog.load_session(game_id, mode).await?;
        let game = self.rules.prepare(game)?;

        let play_id = Uuid::new_v4().to_string();
        let handle = spawn_play(
            play_id.clone(),
            game,
            Arc::clone(&self.evaluator),
            self.event_bus.clone(),
            self.driver_config.clone(),
        )?;

        self.plays.write().await.insert(
            play_id.clone(),
            PlayEntry {
                handle: handle.clone(),
                game_id: game_id.to_string(),
            },
        );

        info!(play_id = %play_id, game_id = %game_id, mode = %mode, "Play created");
        Ok(handle)
    }

    /// Look up a play and mark it as active
    pub async fn get_play(&self, play_id: &str) -> Option<PlayHandle> {
        let handle = self.plays.read().await.get(play_id)?.handle.clone();
        handle.touch().await;
        Some(handle)
    }

    /// Stop a play and forget it; returns whether it existed
    #[instrument(skip(self))]
    pub async fn remove_play(&self, play_id: &str) -> bool {
        let removed = self.plays.write().await.remove(play_id);

        match removed {
            Some(entry) => {
                entry.handle.shutdown().await;
                self.event_bus.remove_play(play_id).await;
                info!(play_id = %play_id, game_id = %entry.game_id, "Play removed");
                true
            }
            None => {
                debug!(play_id = %play_id, "No play to remove");
                false
            }
        }
    }

    /// Ids of plays with no activity for longer than `threshold`
    ///
    /// Intents dispatched through any handle count as activity.
    pub async fn get_inactive_plays(&self, threshold: Duration) -> Vec<String> {
        let threshold = match chrono::Duration::from_std(threshold) {
            Ok(threshold) => threshold,
            Err(e) => {
                warn!(error = %e, "Inactivity threshold out of range");
                return Vec::new();
            }
        };
        let cutoff = Utc::now() - threshold;

        let plays = self.plays.read().await;
        let mut inactive = Vec::new();
        for (play_id, entry) in plays.iter() {
            if entry.handle.is_closed() || entry.handle.last_activity_at().await < cutoff {
                inactive.push(play_id.clone());
            }
        }
        inactive
    }

    pub async fn play_count(&self) -> usize {
        self.plays.read().await.len()
    }
}
