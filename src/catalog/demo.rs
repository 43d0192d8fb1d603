// Built-in game served when no remote API is configured

use crate::evaluator::InMemoryAnswerEvaluator;
use crate::quiz::{GameSession, Question, QuizOption};

pub const DEMO_GAME_ID: &str = "demo";

/// (question id, correct option id)
const DEMO_ANSWERS: [(&str, &str); 3] = [("q1", "b"), ("q2", "c"), ("q3", "a")];

pub fn demo_game() -> GameSession {
    GameSession::new(
        DEMO_GAME_ID,
        "General Knowledge",
        vec![
            Question::new(
                "q1",
                "Which planet is known as the Red Planet?",
                20,
                10,
                vec![
                    QuizOption::new("a", "Venus"),
                    QuizOption::new("b", "Mars"),
                    QuizOption::new("c", "Jupiter"),
                    QuizOption::new("d", "Saturn"),
                ],
            ),
            Question::new(
                "q2",
                "What is the chemical symbol for gold?",
                15,
                10,
                vec![
                    QuizOption::new("a", "Ag"),
                    QuizOption::new("b", "Go"),
                    QuizOption::new("c", "Au"),
                ],
            ),
            Question::new(
                "q3",
                "How many continents are there?",
                10,
                5,
                vec![QuizOption::new("a", "7"), QuizOption::new("b", "5")],
            ),
        ],
    )
    .with_description("A short sample quiz")
}

/// Register the demo game's answer key with an in-memory evaluator
pub async fn seed_demo_answers(evaluator: &InMemoryAnswerEvaluator) {
    let game = demo_game();
    for (question_id, correct_option_id) in DEMO_ANSWERS {
        let points = game
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .map(|q| q.point_value)
            .unwrap_or(0);
        evaluator
            .add_answer(DEMO_GAME_ID, question_id, correct_option_id, points)
            .await;
    }
}
