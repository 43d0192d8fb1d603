use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use strum_macros::Display;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::quiz::{GameSession, LoadError};

/// Which flavour of a game to load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlayMode {
    /// Published game, as played by anyone
    #[default]
    Public,
    /// Creator preview of a game that may not be published yet
    Preview,
}

/// Source of game definitions
#[async_trait]
pub trait GameCatalog: Send + Sync {
    /// Fetch a game by id; a game with no questions fails with `NoQuestions`
    async fn load_session(&self, game_id: &str, mode: PlayMode) -> Result<GameSession, LoadError>;
}

/// In-memory catalog for development and testing
///
/// Preview mode sees every game; public mode only sees published ones.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGameCatalog {
    games: Arc<RwLock<HashMap<String, CatalogEntry>>>,
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    game: GameSession,
    published: bool,
}

impl InMemoryGameCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a published game
    pub async fn insert(&self, game: GameSession) {
        self.insert_entry(game, true).await;
    }

    /// Add a game that is only reachable through preview
    pub async fn insert_draft(&self, game: GameSession) {
        self.insert_entry(game, false).await;
    }

    async fn insert_entry(&self, game: GameSession, published: bool) {
        let mut games = self.games.write().await;
        games.insert(game.id.clone(), CatalogEntry { game, published });
    }

    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }
}

#[async_trait]
impl GameCatalog for InMemoryGameCatalog {
    #[instrument(skip(self))]
    async fn load_session(&self, game_id: &str, mode: PlayMode) -> Result<GameSession, LoadError> {
        let games = self.games.read().await;
        let entry = games
            .get(game_id)
            .filter(|entry| entry.published || mode == PlayMode::Preview)
            .ok_or_else(|| LoadError::NotFound(game_id.to_string()))?;

        if entry.game.questions.is_empty() {
            return Err(LoadError::NoQuestions);
        }

        debug!(
            game_id = %game_id,
            questions = entry.game.questions.len(),
            "Game loaded from memory"
        );
        Ok(entry.game.clone())
    }
}
