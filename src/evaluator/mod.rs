// Answer evaluation: the contract the engine relies on and its implementations

// Public API
pub use client::{AnswerEvaluator, EvaluationError, EvaluationRequest, EvaluationResult};
pub use http::HttpAnswerEvaluator;
pub use memory::InMemoryAnswerEvaluator;

// Internal modules
mod client;
mod http;
mod memory;
