use serde::{Deserialize, Serialize};

use super::state::{QuestionOutcome, Resolution};

/// Final statistics of a completed play session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_score: u32,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub total_questions: usize,
    /// Questions whose countdown ran out (counted as incorrect)
    pub unanswered_count: usize,
    /// Questions whose evaluation failed (counted as incorrect)
    pub failed_evaluations: usize,
    pub max_score: u32,
}

impl SessionSummary {
    /// Aggregate the outcomes of a completed session
    pub fn from_outcomes(outcomes: &[QuestionOutcome], max_score: u32) -> Self {
        outcomes.iter().fold(
            Self {
                total_questions: outcomes.len(),
                max_score,
                ..Self::default()
            },
            |mut summary, outcome| {
                summary.total_score = summary.total_score.saturating_add(outcome.score_awarded);
                if outcome.is_correct {
                    summary.correct_count += 1;
                } else {
                    summary.incorrect_count += 1;
                }
                match outcome.resolution {
                    Resolution::TimedOut => summary.unanswered_count += 1,
                    Resolution::EvaluationFailed => summary.failed_evaluations += 1,
                    Resolution::Evaluated => {}
                }
                summary
            },
        )
    }

    /// Share of correctly answered questions, in percent
    pub fn accuracy_percent(&self) -> u32 {
        if self.total_questions == 0 {
            return 0;
        }
        ((self.correct_count * 100) / self.total_questions) as u32
    }
}
