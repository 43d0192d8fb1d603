// Quiz data model and the checks applied when a game enters the engine

// Public API
pub use errors::LoadError;
pub use models::{GameSession, Question, QuizOption};
pub use validation::QuizRules;

// Internal modules
mod errors;
mod models;
mod validation;
