#![allow(dead_code)]

use gameshow::quiz::{GameSession, Question, QuizOption};

pub const GAME_ID: &str = "game-1";

/// Builder for the question sets used in workflow tests
pub struct GameBuilder {
    questions: Vec<Question>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self { questions: vec![] }
    }

    /// Add a question with options `a`, `b` and `c`
    pub fn with_question(mut self, time_limit_seconds: u32, points: u32) -> Self {
        let id = format!("q{}", self.questions.len() + 1);
        self.questions.push(Question::new(
            id.clone(),
            format!("Question {}", id),
            time_limit_seconds,
            points,
            vec![
                QuizOption::new("a", "Alpha"),
                QuizOption::new("b", "Bravo"),
                QuizOption::new("c", "Charlie"),
            ],
        ));
        self
    }

    pub fn build(self) -> GameSession {
        GameSession::new(GAME_ID, "Workflow game", self.questions)
    }
}
