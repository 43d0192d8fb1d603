use serde::{Deserialize, Serialize};

use crate::engine::{QuestionOutcome, SessionSummary};

/// Events emitted by a play session
///
/// Events describe transitions that already happened. Subscribers use them for
/// logging and push updates; they never feed back into the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionEvent {
    /// A question was armed and its countdown started
    QuestionStarted {
        play_id: String,
        question_index: usize,
        question_id: String,
        time_limit_seconds: u32,
    },

    /// An option was chosen and sent for evaluation
    AnswerSubmitted {
        play_id: String,
        question_id: String,
        option_id: String,
        time_taken_seconds: u32,
    },

    /// A question was resolved (answered or timed out)
    OutcomeRecorded {
        play_id: String,
        outcome: QuestionOutcome,
        total_score: u32,
    },

    /// The evaluator could not judge an answer
    EvaluationFailed {
        play_id: String,
        question_id: String,
        error: String,
    },

    /// The last question was left behind
    SessionCompleted {
        play_id: String,
        summary: SessionSummary,
    },

    /// All progress was discarded and the first question armed again
    SessionRestarted { play_id: String },
}

impl SessionEvent {
    pub fn play_id(&self) -> &str {
        match self {
            SessionEvent::QuestionStarted { play_id, .. } => play_id,
            SessionEvent::AnswerSubmitted { play_id, .. } => play_id,
            SessionEvent::OutcomeRecorded { play_id, .. } => play_id,
            SessionEvent::EvaluationFailed { play_id, .. } => play_id,
            SessionEvent::SessionCompleted { play_id, .. } => play_id,
            SessionEvent::SessionRestarted { play_id } => play_id,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::QuestionStarted { .. } => "question_started",
            SessionEvent::AnswerSubmitted { .. } => "answer_submitted",
            SessionEvent::OutcomeRecorded { .. } => "outcome_recorded",
            SessionEvent::EvaluationFailed { .. } => "evaluation_failed",
            SessionEvent::SessionCompleted { .. } => "session_completed",
            SessionEvent::SessionRestarted { .. } => "session_restarted",
        }
    }
}
