use thiserror::Error;

/// Errors that prevent a game from being loaded into a play session
///
/// A play is never created when loading fails; the caller has to retry the load.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("Game not found: {0}")]
    NotFound(String),

    #[error("Game service unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed game data: {0}")]
    Malformed(String),

    #[error("Game has no questions")]
    NoQuestions,

    #[error("Invalid question {question_id}: {reason}")]
    InvalidQuestion { question_id: String, reason: String },
}

impl LoadError {
    pub fn invalid_question(question_id: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadError::InvalidQuestion {
            question_id: question_id.into(),
            reason: reason.into(),
        }
    }
}
