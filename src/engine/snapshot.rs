use serde::{Deserialize, Serialize};

use super::machine::SessionMachine;
use super::state::{Phase, QuestionOutcome};
use super::summary::SessionSummary;
use crate::quiz::Question;

/// Immutable view of a play session handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub play_id: String,
    pub game_id: String,
    pub title: String,
    pub phase: Phase,
    pub current_index: usize,
    pub total_questions: usize,
    pub current_question: Option<Question>,
    pub is_last_question: bool,
    pub remaining_seconds: u32,
    pub total_score: u32,
    pub last_outcome: Option<QuestionOutcome>,
    /// Text of the revealed correct option for `last_outcome`
    pub correct_option_text: Option<String>,
    pub last_error: Option<String>,
    pub summary: Option<SessionSummary>,
}

impl SessionSnapshot {
    pub fn capture(play_id: &str, machine: &SessionMachine) -> Self {
        let game = machine.game();
        let state = machine.state();
        let last_outcome = state.last_outcome().cloned();

        let correct_option_text = last_outcome.as_ref().and_then(|outcome| {
            let correct_id = outcome.correct_option_id.as_deref()?;
            game.questions
                .iter()
                .find(|q| q.id == outcome.question_id)
                .and_then(|q| q.option_text(correct_id))
                .map(str::to_string)
        });

        Self {
            play_id: play_id.to_string(),
            game_id: game.id.clone(),
            title: game.title.clone(),
            phase: state.phase(),
            current_index: state.current_index(),
            total_questions: machine.total_questions(),
            current_question: machine.current_question().cloned(),
            is_last_question: machine.is_last_question(),
            remaining_seconds: state.remaining_seconds(),
            total_score: state.total_score(),
            last_outcome,
            correct_option_text,
            last_error: state.last_error().map(str::to_string),
            summary: machine.summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::EvaluationResult;
    use crate::quiz::{GameSession, QuizOption};
    use std::sync::Arc;

    fn machine() -> SessionMachine {
        let game = GameSession::new(
            "game-1",
            "Capitals",
            vec![
                Question::new(
                    "q1",
                    "Capital of Japan?",
                    30,
                    10,
                    vec![QuizOption::new("a", "Tokyo"), QuizOption::new("b", "Osaka")],
                ),
                Question::new(
                    "q2",
                    "Capital of Italy?",
                    30,
                    10,
                    vec![QuizOption::new("a", "Milan"), QuizOption::new("b", "Rome")],
                ),
            ],
        );
        SessionMachine::new(Arc::new(game)).unwrap()
    }

    #[test]
    fn test_idle_snapshot() {
        let snapshot = SessionSnapshot::capture("play-1", &machine());

        assert_eq!(snapshot.play_id, "play-1");
        assert_eq!(snapshot.game_id, "game-1");
        assert_eq!(snapshot.phase, Phase::Idle);
        assert_eq!(snapshot.total_questions, 2);
        assert_eq!(
            snapshot.current_question.as_ref().map(|q| q.id.as_str()),
            Some("q1")
        );
        assert!(!snapshot.is_last_question);
        assert!(snapshot.last_outcome.is_none());
        assert!(snapshot.summary.is_none());
    }

    #[test]
    fn test_wrong_answer_reveals_correct_option_text() {
        let mut m = machine();
        m.start().unwrap();
        let ticket = m.select_option("b", 4).unwrap();
        m.resolve_evaluation(
            &ticket,
            Ok(EvaluationResult {
                is_correct: false,
                score_awarded: 0,
                correct_option_id: Some("a".to_string()),
                message: Some("Salah".to_string()),
            }),
        )
        .unwrap();

        let snapshot = SessionSnapshot::capture("play-1", &m);

        assert_eq!(snapshot.phase, Phase::ResultShown);
        assert_eq!(snapshot.correct_option_text.as_deref(), Some("Tokyo"));
        assert_eq!(
            snapshot.last_outcome.and_then(|o| o.message),
            Some("Salah".to_string())
        );
    }

    #[test]
    fn test_snapshot_serializes_phase_for_clients() {
        let snapshot = SessionSnapshot::capture("play-1", &machine());
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["phase"], "IDLE");
        assert_eq!(json["current_question"]["options"][0]["text"], "Tokyo");
    }
}
