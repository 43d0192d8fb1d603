#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

use gameshow::{
    event::{EventBus, SessionEvent},
    play::{spawn_play, DriverConfig, PlayHandle},
    quiz::GameSession,
};

use super::game_builders::GameBuilder;
use super::mocks::MockEvaluator;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub play: PlayHandle,
    pub evaluator: MockEvaluator,
    pub event_bus: EventBus,
    pub events: broadcast::Receiver<SessionEvent>,
}

pub struct TestSetupBuilder {
    game: Option<GameSession>,
    evaluator: MockEvaluator,
    evaluation_timeout: Duration,
    play_id: String,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            game: None,
            evaluator: MockEvaluator::correct_is_a(10),
            evaluation_timeout: DriverConfig::default().evaluation_timeout,
            play_id: "play-123".to_string(),
        }
    }

    pub fn with_game(mut self, game: GameSession) -> Self {
        self.game = Some(game);
        self
    }

    /// One 30 second question worth 10 points
    pub fn with_single_question(self) -> Self {
        self.with_game(GameBuilder::new().with_question(30, 10).build())
    }

    pub fn with_evaluator(mut self, evaluator: MockEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn with_evaluation_timeout(mut self, timeout: Duration) -> Self {
        self.evaluation_timeout = timeout;
        self
    }

    pub async fn build(self) -> TestSetup {
        let game = self
            .game
            .unwrap_or_else(|| GameBuilder::new().with_question(30, 10).build());
        let event_bus = EventBus::new();
        let events = event_bus.subscribe_to_play(&self.play_id).await;

        let play = spawn_play(
            self.play_id,
            game,
            Arc::new(self.evaluator.clone()),
            event_bus.clone(),
            DriverConfig {
                evaluation_timeout: self.evaluation_timeout,
            },
        )
        .unwrap();

        TestSetup {
            play,
            evaluator: self.evaluator,
            event_bus,
            events,
        }
    }
}
