// Session state machine
//
// Idle -> QuestionActive -> Evaluating -> ResultShown -> (QuestionActive | SessionComplete)
//
// The machine is synchronous and owns no timers or network handles. Every
// transition either returns what the caller must do next (arm a countdown,
// send an evaluation) or an `IntentRejected` explaining why nothing changed.

use std::sync::Arc;
use thiserror::Error;

use super::state::{Phase, QuestionOutcome, SessionState};
use super::summary::SessionSummary;
use crate::evaluator::{EvaluationError, EvaluationRequest, EvaluationResult};
use crate::quiz::{GameSession, LoadError, Question};

/// Why an intent or event left the session untouched
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntentRejected {
    #[error("{intent} is not accepted while {phase}")]
    InvalidPhase { intent: &'static str, phase: Phase },

    #[error("Option {0} does not belong to the current question")]
    UnknownOption(String),

    #[error("Stale timer event for epoch {event_epoch} (current epoch {current_epoch})")]
    StaleEpoch { event_epoch: u64, current_epoch: u64 },

    #[error("Stale evaluation for question {question_index} at epoch {epoch}")]
    StaleEvaluation { epoch: u64, question_index: usize },
}

/// Instruction to start a countdown for the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerArm {
    pub epoch: u64,
    pub question_index: usize,
    pub duration_seconds: u32,
}

/// A pending evaluation, tagged with the question it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationTicket {
    pub epoch: u64,
    pub question_index: usize,
    pub request: EvaluationRequest,
}

/// Result of a successful `advance`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advanced {
    NextQuestion(TimerArm),
    Completed(SessionSummary),
}

pub struct SessionMachine {
    game: Arc<GameSession>,
    state: SessionState,
}

impl SessionMachine {
    /// Create a machine in `Idle` for a loaded game
    pub fn new(game: Arc<GameSession>) -> Result<Self, LoadError> {
        if game.questions.is_empty() {
            return Err(LoadError::NoQuestions);
        }

        Ok(Self {
            game,
            state: SessionState::new(0),
        })
    }

    pub fn game(&self) -> &GameSession {
        &self.game
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn total_questions(&self) -> usize {
        self.game.questions.len()
    }

    /// The question being played, `None` once the session is complete
    pub fn current_question(&self) -> Option<&Question> {
        self.game.questions.get(self.state.current_index)
    }

    pub fn is_last_question(&self) -> bool {
        self.state.current_index + 1 >= self.game.questions.len()
    }

    /// Final summary, available once the session is complete
    pub fn summary(&self) -> Option<SessionSummary> {
        (self.state.phase == Phase::SessionComplete)
            .then(|| SessionSummary::from_outcomes(&self.state.outcomes, self.game.max_score()))
    }

    /// Arm the first question
    pub fn start(&mut self) -> Result<TimerArm, IntentRejected> {
        self.require_phase("start", Phase::Idle)?;
        Ok(self.arm_current())
    }

    /// Choose an option for the current question
    ///
    /// Only one selection per question is accepted; later ones are rejected while
    /// the first is being evaluated or after the question resolved.
    pub fn select_option(
        &mut self,
        option_id: &str,
        time_taken_seconds: u32,
    ) -> Result<EvaluationTicket, IntentRejected> {
        self.require_phase("select_option", Phase::QuestionActive)?;

        let question = self.question_at(self.state.current_index);
        if !question.has_option(option_id) {
            return Err(IntentRejected::UnknownOption(option_id.to_string()));
        }

        let request = EvaluationRequest {
            session_id: self.game.id.clone(),
            question_id: question.id.clone(),
            selected_option_id: option_id.to_string(),
            time_taken_seconds: time_taken_seconds.min(question.time_limit_seconds),
        };

        self.state.phase = Phase::Evaluating;

        Ok(EvaluationTicket {
            epoch: self.state.timer_epoch,
            question_index: self.state.current_index,
            request,
        })
    }

    /// Record a countdown tick for display
    pub fn timer_tick(&mut self, epoch: u64, remaining_seconds: u32) -> Result<(), IntentRejected> {
        self.require_epoch(epoch)?;
        self.require_phase("timer_tick", Phase::QuestionActive)?;
        self.state.remaining_seconds = remaining_seconds;
        Ok(())
    }

    /// Resolve the current question as unanswered
    pub fn timer_expired(&mut self, epoch: u64) -> Result<&QuestionOutcome, IntentRejected> {
        self.require_epoch(epoch)?;
        self.require_phase("timer_expired", Phase::QuestionActive)?;

        let outcome = QuestionOutcome::timed_out(self.question_at(self.state.current_index));
        self.state.remaining_seconds = 0;
        Ok(self.state.record(outcome))
    }

    /// Merge the evaluator's answer (or failure) for a ticket
    ///
    /// Failures are absorbed into an incorrect, zero-score outcome so the session
    /// can always move on.
    pub fn resolve_evaluation(
        &mut self,
        ticket: &EvaluationTicket,
        result: Result<EvaluationResult, EvaluationError>,
    ) -> Result<&QuestionOutcome, IntentRejected> {
        if ticket.epoch != self.state.timer_epoch
            || ticket.question_index != self.state.current_index
        {
            return Err(IntentRejected::StaleEvaluation {
                epoch: ticket.epoch,
                question_index: ticket.question_index,
            });
        }
        self.require_phase("resolve_evaluation", Phase::Evaluating)?;

        let question = self.question_at(ticket.question_index);
        let request = &ticket.request;
        let outcome = match result {
            Ok(result) => QuestionOutcome::evaluated(
                question,
                &request.selected_option_id,
                request.time_taken_seconds,
                result,
            ),
            Err(error) => {
                let outcome = QuestionOutcome::evaluation_failed(
                    question,
                    &request.selected_option_id,
                    request.time_taken_seconds,
                    &error,
                );
                self.state.last_error = Some(error.to_string());
                outcome
            }
        };

        Ok(self.state.record(outcome))
    }

    /// Move past a resolved question
    pub fn advance(&mut self) -> Result<Advanced, IntentRejected> {
        self.require_phase("advance", Phase::ResultShown)?;

        self.state.last_error = None;

        if self.state.current_index + 1 < self.game.questions.len() {
            self.state.current_index += 1;
            return Ok(Advanced::NextQuestion(self.arm_current()));
        }

        self.state.current_index = self.game.questions.len();
        self.state.phase = Phase::SessionComplete;
        self.state.remaining_seconds = 0;

        Ok(Advanced::Completed(SessionSummary::from_outcomes(
            &self.state.outcomes,
            self.game.max_score(),
        )))
    }

    /// Discard all progress and arm the first question again
    ///
    /// The epoch keeps counting from the abandoned play so that its late timer
    /// and evaluation callbacks stay stale.
    pub fn restart(&mut self) -> TimerArm {
        self.state = SessionState::new(self.state.timer_epoch);
        self.arm_current()
    }

    fn arm_current(&mut self) -> TimerArm {
        let duration_seconds = self.question_at(self.state.current_index).time_limit_seconds;

        self.state.timer_epoch += 1;
        self.state.phase = Phase::QuestionActive;
        self.state.remaining_seconds = duration_seconds;

        TimerArm {
            epoch: self.state.timer_epoch,
            question_index: self.state.current_index,
            duration_seconds,
        }
    }

    fn question_at(&self, index: usize) -> &Question {
        &self.game.questions[index]
    }

    fn require_phase(&self, intent: &'static str, expected: Phase) -> Result<(), IntentRejected> {
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(IntentRejected::InvalidPhase {
                intent,
                phase: self.state.phase,
            })
        }
    }

    fn require_epoch(&self, epoch: u64) -> Result<(), IntentRejected> {
        if epoch == self.state.timer_epoch {
            Ok(())
        } else {
            Err(IntentRejected::StaleEpoch {
                event_epoch: epoch,
                current_epoch: self.state.timer_epoch,
            })
        }
    }
}

impl std::fmt::Debug for SessionMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionMachine")
            .field("game_id", &self.game.id)
            .field("questions", &self.game.questions.len())
            .field("state", &self.state)
            .finish()
    }
}
