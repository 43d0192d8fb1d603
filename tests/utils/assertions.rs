//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use gameshow::engine::{Phase, Resolution, SessionSnapshot};

// ============================================================================
// Snapshot Assertions
// ============================================================================

pub struct SnapshotAssertion<'a> {
    snapshot: &'a SessionSnapshot,
}

impl<'a> SnapshotAssertion<'a> {
    pub fn of(snapshot: &'a SessionSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn in_phase(self, expected: Phase) -> Self {
        assert_eq!(self.snapshot.phase, expected, "unexpected phase");
        self
    }

    pub fn at_question(self, expected_index: usize) -> Self {
        assert_eq!(
            self.snapshot.current_index, expected_index,
            "unexpected question index"
        );
        self
    }

    pub fn with_score(self, expected: u32) -> Self {
        assert_eq!(self.snapshot.total_score, expected, "unexpected total score");
        self
    }

    pub fn without_outcome(self) -> Self {
        assert!(
            self.snapshot.last_outcome.is_none(),
            "expected no outcome, got {:?}",
            self.snapshot.last_outcome
        );
        self
    }

    /// Assert on the outcome of the question just resolved
    pub fn with_outcome(self, outcome: OutcomeExpectation) -> Self {
        let actual = self
            .snapshot
            .last_outcome
            .as_ref()
            .expect("expected an outcome");

        assert_eq!(
            actual.selected_option_id.as_deref(),
            outcome.selected_option_id,
            "unexpected selection"
        );
        assert_eq!(actual.is_correct, outcome.is_correct, "unexpected correctness");
        assert_eq!(actual.score_awarded, outcome.score_awarded, "unexpected score");
        assert_eq!(actual.resolution, outcome.resolution, "unexpected resolution");
        self
    }

    pub fn with_error(self) -> Self {
        assert!(self.snapshot.last_error.is_some(), "expected last_error");
        self
    }

    pub fn without_error(self) -> Self {
        assert!(
            self.snapshot.last_error.is_none(),
            "unexpected last_error {:?}",
            self.snapshot.last_error
        );
        self
    }

    /// Summary counts of a completed session
    pub fn with_summary(self, correct: usize, incorrect: usize) -> Self {
        let summary = self.snapshot.summary.as_ref().expect("expected a summary");
        assert_eq!(summary.correct_count, correct, "unexpected correct count");
        assert_eq!(summary.incorrect_count, incorrect, "unexpected incorrect count");
        assert_eq!(
            summary.correct_count + summary.incorrect_count,
            summary.total_questions
        );
        self
    }
}

pub struct OutcomeExpectation {
    pub selected_option_id: Option<&'static str>,
    pub is_correct: bool,
    pub score_awarded: u32,
    pub resolution: Resolution,
}

impl OutcomeExpectation {
    pub fn correct(option_id: &'static str, score: u32) -> Self {
        Self {
            selected_option_id: Some(option_id),
            is_correct: true,
            score_awarded: score,
            resolution: Resolution::Evaluated,
        }
    }

    pub fn wrong(option_id: &'static str) -> Self {
        Self {
            selected_option_id: Some(option_id),
            is_correct: false,
            score_awarded: 0,
            resolution: Resolution::Evaluated,
        }
    }

    pub fn timed_out() -> Self {
        Self {
            selected_option_id: None,
            is_correct: false,
            score_awarded: 0,
            resolution: Resolution::TimedOut,
        }
    }

    pub fn failed(option_id: &'static str) -> Self {
        Self {
            selected_option_id: Some(option_id),
            is_correct: false,
            score_awarded: 0,
            resolution: Resolution::EvaluationFailed,
        }
    }
}
