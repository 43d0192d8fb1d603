// Timed question/answer session engine
//
// The state machine owns all session state; timers and evaluator calls are
// wired in by the play driver.

// Public API
pub use machine::{Advanced, EvaluationTicket, IntentRejected, SessionMachine, TimerArm};
pub use snapshot::SessionSnapshot;
pub use state::{Phase, QuestionOutcome, Resolution, SessionState};
pub use summary::SessionSummary;

// Internal modules
mod machine;
mod snapshot;
mod state;
mod summary;
