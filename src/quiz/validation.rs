use rand::seq::SliceRandom;
use std::collections::HashSet;

use super::errors::LoadError;
use super::models::GameSession;

/// Rules applied to a game at the load boundary
///
/// Option-count bounds differ between game variants, so they are configuration of
/// the play driver rather than a fixed property of the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRules {
    pub min_options: usize,
    pub max_options: usize,
    pub randomize_questions: bool,
}

impl Default for QuizRules {
    fn default() -> Self {
        Self {
            min_options: 2,
            max_options: 6,
            randomize_questions: false,
        }
    }
}

impl QuizRules {
    /// Check the structural invariants of a game before any play starts
    pub fn validate(&self, game: &GameSession) -> Result<(), LoadError> {
        if game.questions.is_empty() {
            return Err(LoadError::NoQuestions);
        }

        let mut question_ids = HashSet::new();
        for question in &game.questions {
            if question.id.trim().is_empty() {
                return Err(LoadError::invalid_question("<empty>", "question id is empty"));
            }
            if !question_ids.insert(question.id.as_str()) {
                return Err(LoadError::invalid_question(
                    &question.id,
                    "duplicate question id",
                ));
            }
            if question.time_limit_seconds == 0 {
                return Err(LoadError::invalid_question(
                    &question.id,
                    "time limit must be positive",
                ));
            }

            let option_count = question.options.len();
            if option_count < self.min_options || option_count > self.max_options {
                return Err(LoadError::invalid_question(
                    &question.id,
                    format!(
                        "expected between {} and {} options, found {}",
                        self.min_options, self.max_options, option_count
                    ),
                ));
            }

            let mut option_ids = HashSet::new();
            for option in &question.options {
                if !option_ids.insert(option.id.as_str()) {
                    return Err(LoadError::invalid_question(
                        &question.id,
                        format!("duplicate option id {}", option.id),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Validate the game and apply question ordering
    ///
    /// Shuffling happens here, before the session exists, so outcomes are always
    /// recorded in play order.
    pub fn prepare(&self, mut game: GameSession) -> Result<GameSession, LoadError> {
        self.validate(&game)?;

        if self.randomize_questions || game.randomize_questions {
            game.questions.shuffle(&mut rand::rng());
        }

        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::models::{Question, QuizOption};
    use rstest::rstest;

    fn options(count: usize) -> Vec<QuizOption> {
        (0..count)
            .map(|i| QuizOption::new(format!("o{}", i), format!("Option {}", i)))
            .collect()
    }

    fn game_with(questions: Vec<Question>) -> GameSession {
        GameSession::new("game-1", "Test game", questions)
    }

    #[test]
    fn test_empty_game_is_rejected() {
        let err = QuizRules::default().validate(&game_with(vec![])).unwrap_err();
        assert_eq!(err, LoadError::NoQuestions);
    }

    #[rstest]
    #[case(1, false)]
    #[case(2, true)]
    #[case(4, true)]
    #[case(6, true)]
    #[case(7, false)]
    fn test_option_count_bounds(#[case] count: usize, #[case] valid: bool) {
        let game = game_with(vec![Question::new("q1", "?", 30, 10, options(count))]);
        assert_eq!(QuizRules::default().validate(&game).is_ok(), valid);
    }

    #[test]
    fn test_custom_bounds_for_stricter_variant() {
        let rules = QuizRules {
            max_options: 4,
            ..QuizRules::default()
        };
        let game = game_with(vec![Question::new("q1", "?", 30, 10, options(5))]);
        assert!(matches!(
            rules.validate(&game),
            Err(LoadError::InvalidQuestion { .. })
        ));
    }

    #[test]
    fn test_zero_time_limit_is_rejected() {
        let game = game_with(vec![Question::new("q1", "?", 0, 10, options(2))]);
        let err = QuizRules::default().validate(&game).unwrap_err();
        assert_eq!(
            err,
            LoadError::invalid_question("q1", "time limit must be positive")
        );
    }

    #[test]
    fn test_duplicate_question_ids_are_rejected() {
        let game = game_with(vec![
            Question::new("q1", "?", 30, 10, options(2)),
            Question::new("q1", "again?", 30, 10, options(2)),
        ]);
        assert!(QuizRules::default().validate(&game).is_err());
    }

    #[test]
    fn test_duplicate_option_ids_are_rejected() {
        let game = game_with(vec![Question::new(
            "q1",
            "?",
            30,
            10,
            vec![QuizOption::new("a", "A"), QuizOption::new("a", "B")],
        )]);
        let err = QuizRules::default().validate(&game).unwrap_err();
        assert!(err.to_string().contains("duplicate option id a"));
    }

    #[test]
    fn test_prepare_keeps_order_without_randomization() {
        let game = game_with(
            (0..5)
                .map(|i| Question::new(format!("q{}", i), "?", 30, 10, options(2)))
                .collect(),
        );
        let prepared = QuizRules::default().prepare(game.clone()).unwrap();
        assert_eq!(prepared.questions, game.questions);
    }

    #[test]
    fn test_prepare_randomization_keeps_all_questions() {
        let game = game_with(
            (0..20)
                .map(|i| Question::new(format!("q{}", i), "?", 30, 10, options(2)))
                .collect(),
        );
        let rules = QuizRules {
            randomize_questions: true,
            ..QuizRules::default()
        };

        let prepared = rules.prepare(game.clone()).unwrap();

        let mut original: Vec<_> = game.questions.iter().map(|q| q.id.clone()).collect();
        let mut shuffled: Vec<_> = prepared.questions.iter().map(|q| q.id.clone()).collect();
        original.sort();
        shuffled.sort();
        assert_eq!(original, shuffled);
    }
}
