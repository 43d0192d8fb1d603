use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A submitted answer for one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub session_id: String,
    pub question_id: String,
    pub selected_option_id: String,
    pub time_taken_seconds: u32,
}

/// The evaluator's verdict on a submitted answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub is_correct: bool,
    pub score_awarded: u32,
    pub correct_option_id: Option<String>,
    pub message: Option<String>,
}

/// Errors that can occur while evaluating an answer
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Evaluator unreachable: {0}")]
    Transport(String),

    #[error("Evaluator returned status {0}")]
    Status(u16),

    #[error("Evaluator response could not be decoded: {0}")]
    Decode(String),

    #[error("Evaluation timed out after {0}s")]
    Timeout(u64),

    #[error("Evaluation rejected: {0}")]
    Rejected(String),
}

/// Remote service that decides whether an answer is correct
///
/// Implementations make a single attempt per call; retrying belongs to the
/// transport, not to this contract.
#[async_trait]
pub trait AnswerEvaluator: Send + Sync {
    async fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationResult, EvaluationError>;

    /// Get a human-readable name for this evaluator (for logging/debugging)
    fn name(&self) -> &'static str;
}
