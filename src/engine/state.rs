use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use crate::evaluator::{EvaluationError, EvaluationResult};
use crate::quiz::Question;

/// Current state of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Idle,
    QuestionActive,
    Evaluating,
    ResultShown,
    SessionComplete,
}

/// How a question was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "snake_case")]
pub enum Resolution {
    /// The evaluator answered
    Evaluated,
    /// The countdown ran out before an option was chosen
    TimedOut,
    /// An option was chosen but the evaluator could not be reached
    EvaluationFailed,
}

/// Immutable record of how a single question was resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub question_id: String,
    pub selected_option_id: Option<String>,
    pub is_correct: bool,
    pub score_awarded: u32,
    pub correct_option_id: Option<String>,
    pub time_taken_seconds: u32,
    pub resolution: Resolution,
    pub message: Option<String>,
}

impl QuestionOutcome {
    pub(super) fn timed_out(question: &Question) -> Self {
        Self {
            question_id: question.id.clone(),
            selected_option_id: None,
            is_correct: false,
            score_awarded: 0,
            correct_option_id: None,
            time_taken_seconds: question.time_limit_seconds,
            resolution: Resolution::TimedOut,
            message: None,
        }
    }

    /// Build the outcome from an evaluator verdict
    ///
    /// The awarded score is capped at the question's point value and is zero for
    /// incorrect answers.
    pub(super) fn evaluated(
        question: &Question,
        selected_option_id: &str,
        time_taken_seconds: u32,
        result: EvaluationResult,
    ) -> Self {
        let score_awarded = if result.is_correct {
            result.score_awarded.min(question.point_value)
        } else {
            0
        };

        Self {
            question_id: question.id.clone(),
            selected_option_id: Some(selected_option_id.to_string()),
            is_correct: result.is_correct,
            score_awarded,
            correct_option_id: result.correct_option_id,
            time_taken_seconds,
            resolution: Resolution::Evaluated,
            message: result.message,
        }
    }

    pub(super) fn evaluation_failed(
        question: &Question,
        selected_option_id: &str,
        time_taken_seconds: u32,
        error: &EvaluationError,
    ) -> Self {
        Self {
            question_id: question.id.clone(),
            selected_option_id: Some(selected_option_id.to_string()),
            is_correct: false,
            score_awarded: 0,
            correct_option_id: None,
            time_taken_seconds,
            resolution: Resolution::EvaluationFailed,
            message: Some(error.to_string()),
        }
    }
}

/// Mutable state of one play-through, owned by a single `SessionMachine`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub(super) current_index: usize,
    pub(super) total_score: u32,
    pub(super) outcomes: Vec<QuestionOutcome>,
    pub(super) phase: Phase,
    pub(super) timer_epoch: u64,
    pub(super) remaining_seconds: u32,
    pub(super) last_error: Option<String>,
}

impl SessionState {
    /// Fresh state whose epoch continues from `epoch_base`
    pub(super) fn new(epoch_base: u64) -> Self {
        Self {
            current_index: 0,
            total_score: 0,
            outcomes: Vec::new(),
            phase: Phase::Idle,
            timer_epoch: epoch_base,
            remaining_seconds: 0,
            last_error: None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn outcomes(&self) -> &[QuestionOutcome] {
        &self.outcomes
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn timer_epoch(&self) -> u64 {
        self.timer_epoch
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_outcome(&self) -> Option<&QuestionOutcome> {
        self.outcomes.last()
    }

    /// Append an outcome for the current question and fold its score in
    pub(super) fn record(&mut self, outcome: QuestionOutcome) -> &QuestionOutcome {
        self.total_score = self.total_score.saturating_add(outcome.score_awarded);
        self.outcomes.push(outcome);
        self.phase = Phase::ResultShown;
        &self.outcomes[self.outcomes.len() - 1]
    }
}
