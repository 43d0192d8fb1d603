use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::client::{AnswerEvaluator, EvaluationError, EvaluationRequest, EvaluationResult};

#[derive(Debug, Clone)]
struct AnswerKey {
    correct_option_id: String,
    points: u32,
}

/// In-memory evaluator for development and testing
///
/// Holds the answer key locally instead of asking the remote service. Keys are
/// scoped by game id so several games can share one instance.
#[derive(Default)]
pub struct InMemoryAnswerEvaluator {
    keys: RwLock<HashMap<(String, String), AnswerKey>>,
}

impl InMemoryAnswerEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the correct option and the points awarded for a question
    pub async fn add_answer(
        &self,
        game_id: &str,
        question_id: &str,
        correct_option_id: &str,
        points: u32,
    ) {
        let mut keys = self.keys.write().await;
        keys.insert(
            (game_id.to_string(), question_id.to_string()),
            AnswerKey {
                correct_option_id: correct_option_id.to_string(),
                points,
            },
        );
    }

    pub async fn answer_count(&self) -> usize {
        self.keys.read().await.len()
    }
}

#[async_trait]
impl AnswerEvaluator for InMemoryAnswerEvaluator {
    #[instrument(skip(self, request), fields(session_id = %request.session_id, question_id = %request.question_id))]
    async fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationResult, EvaluationError> {
        let keys = self.keys.read().await;
        let key = keys
            .get(&(request.session_id.clone(), request.question_id.clone()))
            .ok_or_else(|| {
                EvaluationError::Rejected(format!("Unknown question: {}", request.question_id))
            })?;

        let is_correct = key.correct_option_id == request.selected_option_id;
        debug!(is_correct = is_correct, "Answer evaluated in memory");

        Ok(EvaluationResult {
            is_correct,
            score_awarded: if is_correct { key.points } else { 0 },
            correct_option_id: Some(key.correct_option_id.clone()),
            message: Some(if is_correct { "Correct!" } else { "Wrong answer" }.to_string()),
        })
    }

    fn name(&self) -> &'static str {
        "InMemoryAnswerEvaluator"
    }
}
