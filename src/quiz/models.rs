use serde::{Deserialize, Serialize};

/// A single answer choice shown to the player.
///
/// Options never carry correctness; the correct option is only revealed by the
/// evaluator after an answer has been submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
}

impl QuizOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub image_url: Option<String>,
    pub time_limit_seconds: u32,
    pub point_value: u32,
    pub options: Vec<QuizOption>,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        time_limit_seconds: u32,
        point_value: u32,
        options: Vec<QuizOption>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            image_url: None,
            time_limit_seconds,
            point_value,
            options,
        }
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }

    /// Resolve an option id to its display text
    pub fn option_text(&self, option_id: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.id == option_id)
            .map(|o| o.text.as_str())
    }
}

/// A loaded game definition, read-only once a play has started
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub randomize_questions: bool,
}

impl GameSession {
    pub fn new(id: impl Into<String>, title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            thumbnail: None,
            questions,
            randomize_questions: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Highest score a perfect play can reach
    pub fn max_score(&self) -> u32 {
        self.questions.iter().map(|q| q.point_value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question::new(
            "q1",
            "Capital of France?",
            30,
            10,
            vec![QuizOption::new("a", "Paris"), QuizOption::new("b", "Lyon")],
        )
    }

    #[test]
    fn test_option_lookup() {
        let q = question();
        assert!(q.has_option("a"));
        assert!(!q.has_option("z"));
        assert_eq!(q.option_text("b"), Some("Lyon"));
        assert_eq!(q.option_text("z"), None);
    }

    #[test]
    fn test_max_score_sums_point_values() {
        let mut second = question();
        second.id = "q2".to_string();
        second.point_value = 25;
        let game = GameSession::new("g1", "Geography", vec![question(), second]);

        assert_eq!(game.total_questions(), 2);
        assert_eq!(game.max_score(), 35);
    }

    #[test]
    fn test_game_session_serialization_defaults_randomize() {
        let json = r#"{
            "id": "g1",
            "title": "Geo",
            "description": null,
            "thumbnail": null,
            "questions": []
        }"#;
        let game: GameSession = serde_json::from_str(json).unwrap();
        assert!(!game.randomize_questions);
        assert!(game.questions.is_empty());
    }
}
