// Play driver
//
// One tokio task per play owns the `SessionMachine` and serializes everything
// that can change it: user intents, countdown events and evaluator replies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot, watch, RwLock};
use tracing::{debug, info, info_span, trace, warn, Instrument};

use crate::engine::{
    Advanced, EvaluationTicket, QuestionOutcome, Resolution, SessionMachine, SessionSnapshot,
    TimerArm,
};
use crate::evaluator::{AnswerEvaluator, EvaluationError, EvaluationResult};
use crate::event::{EventBus, SessionEvent};
use crate::quiz::{GameSession, LoadError};
use crate::timer::{CountdownTimer, TimerEvent, TimerHandle};

const INTENT_CHANNEL_CAPACITY: usize = 32;

/// User intents accepted by a play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum SessionIntent {
    Start,
    SelectOption { option_id: String },
    Advance,
    Restart,
}

impl SessionIntent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionIntent::Start => "start",
            SessionIntent::SelectOption { .. } => "select_option",
            SessionIntent::Advance => "advance",
            SessionIntent::Restart => "restart",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlayError {
    #[error("Play {0} is no longer running")]
    Closed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Upper bound on a single evaluator call
    pub evaluation_timeout: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            evaluation_timeout: Duration::from_secs(10),
        }
    }
}

enum Command {
    Intent {
        intent: SessionIntent,
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Shutdown,
}

type EvaluationReply = (EvaluationTicket, Result<EvaluationResult, EvaluationError>);

/// Cloneable handle to a running play
#[derive(Clone)]
pub struct PlayHandle {
    play_id: String,
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<SessionSnapshot>,
    event_bus: EventBus,
    last_activity_at: Arc<RwLock<DateTime<Utc>>>,
}

impl PlayHandle {
    pub fn play_id(&self) -> &str {
        &self.play_id
    }

    /// Send an intent and wait for the snapshot taken right after it was handled
    ///
    /// Intents the session cannot accept leave it unchanged; the returned
    /// snapshot then simply shows the current state.
    pub async fn dispatch(&self, intent: SessionIntent) -> Result<SessionSnapshot, PlayError> {
        self.touch().await;
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Intent { intent, reply })
            .await
            .map_err(|_| PlayError::Closed(self.play_id.clone()))?;
        response
            .await
            .map_err(|_| PlayError::Closed(self.play_id.clone()))
    }

    /// Record user activity on this play, shared by every clone of the handle
    pub async fn touch(&self) {
        *self.last_activity_at.write().await = Utc::now();
    }

    pub async fn last_activity_at(&self) -> DateTime<Utc> {
        *self.last_activity_at.read().await
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified after every transition
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    pub async fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        if self.is_closed() {
            // A stopped play hands out an already closed stream
            return broadcast::channel(1).1;
        }
        self.event_bus.subscribe_to_play(&self.play_id).await
    }

    /// Ask the driver to stop; pending timers and evaluations are abandoned
    pub async fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown).await;
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

impl std::fmt::Debug for PlayHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayHandle")
            .field("play_id", &self.play_id)
            .finish()
    }
}

/// Start a driver task for `game` and return its handle
pub fn spawn_play(
    play_id: impl Into<String>,
    game: GameSession,
    evaluator: Arc<dyn AnswerEvaluator>,
    event_bus: EventBus,
    config: DriverConfig,
) -> Result<PlayHandle, LoadError> {
    let play_id = play_id.into();
    let machine = SessionMachine::new(Arc::new(game))?;

    let (commands_tx, commands_rx) = mpsc::channel(INTENT_CHANNEL_CAPACITY);
    let (snapshots_tx, snapshots_rx) =
        watch::channel(SessionSnapshot::capture(&play_id, &machine));
    let (timer_tx, timer_rx) = mpsc::unbounded_channel();
    let (evaluations_tx, evaluations_rx) = mpsc::unbounded_channel();

    let driver = SessionDriver {
        play_id: play_id.clone(),
        machine,
        evaluator,
        event_bus: event_bus.clone(),
        timer: CountdownTimer::new(timer_tx),
        active_timer: None,
        evaluations_tx,
        snapshots: snapshots_tx,
        evaluation_timeout: config.evaluation_timeout,
    };

    let span = info_span!("play_driver", play_id = %play_id);
    tokio::spawn(
        driver
            .run(commands_rx, timer_rx, evaluations_rx)
            .instrument(span),
    );

    Ok(PlayHandle {
        play_id,
        commands: commands_tx,
        snapshots: snapshots_rx,
        event_bus,
        last_activity_at: Arc::new(RwLock::new(Utc::now())),
    })
}

struct SessionDriver {
    play_id: String,
    machine: SessionMachine,
    evaluator: Arc<dyn AnswerEvaluator>,
    event_bus: EventBus,
    timer: CountdownTimer,
    active_timer: Option<TimerHandle>,
    evaluations_tx: mpsc::UnboundedSender<EvaluationReply>,
    snapshots: watch::Sender<SessionSnapshot>,
    evaluation_timeout: Duration,
}

impl SessionDriver {
    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut timer_events: mpsc::UnboundedReceiver<TimerEvent>,
        mut evaluations: mpsc::UnboundedReceiver<EvaluationReply>,
    ) {
        info!(
            game_id = %self.machine.game().id,
            evaluator = self.evaluator.name(),
            "Play driver started"
        );

        loop {
            tokio::select! {
                command = commands.recv() => {
                    match command {
                        Some(Command::Intent { intent, reply }) => {
                            self.handle_intent(intent).await;
                            let _ = reply.send(self.snapshots.borrow().clone());
                        }
                        Some(Command::Shutdown) | None => break,
                    }
                }

                Some(event) = timer_events.recv() => {
                    self.handle_timer_event(event).await;
                }

                Some((ticket, result)) = evaluations.recv() => {
                    self.handle_evaluation(ticket, result).await;
                }
            }
        }

        // Dropping the handle aborts a running countdown
        self.active_timer = None;
        info!("Play driver stopped");
    }

    async fn handle_intent(&mut self, intent: SessionIntent) {
        let name = intent.name();
        debug!(intent = name, phase = %self.machine.phase(), "Handling intent");

        match intent {
            SessionIntent::Start => match self.machine.start() {
                Ok(arm) => self.arm_timer(arm).await,
                Err(reason) => debug!(intent = name, reason = %reason, "Intent rejected"),
            },
            SessionIntent::SelectOption { option_id } => self.select_option(&option_id).await,
            SessionIntent::Advance => match self.machine.advance() {
                Ok(Advanced::NextQuestion(arm)) => self.arm_timer(arm).await,
                Ok(Advanced::Completed(summary)) => {
                    self.active_timer = None;
                    info!(
                        total_score = summary.total_score,
                        correct = summary.correct_count,
                        incorrect = summary.incorrect_count,
                        "Session completed"
                    );
                    self.emit(SessionEvent::SessionCompleted {
                        play_id: self.play_id.clone(),
                        summary,
                    })
                    .await;
                }
                Err(reason) => debug!(intent = name, reason = %reason, "Intent rejected"),
            },
            SessionIntent::Restart => {
                let arm = self.machine.restart();
                info!(epoch = arm.epoch, "Session restarted");
                self.emit(SessionEvent::SessionRestarted {
                    play_id: self.play_id.clone(),
                })
                .await;
                self.arm_timer(arm).await;
            }
        }

        self.publish();
    }

    async fn select_option(&mut self, option_id: &str) {
        let time_taken = self
            .active_timer
            .as_ref()
            .map(TimerHandle::elapsed_seconds)
            .unwrap_or(0);

        let ticket = match self.machine.select_option(option_id, time_taken) {
            Ok(ticket) => ticket,
            Err(reason) => {
                debug!(option_id = %option_id, reason = %reason, "Selection rejected");
                return;
            }
        };

        if let Some(timer) = self.active_timer.take() {
            timer.cancel();
        }

        self.emit(SessionEvent::AnswerSubmitted {
            play_id: self.play_id.clone(),
            question_id: ticket.request.question_id.clone(),
            option_id: option_id.to_string(),
            time_taken_seconds: ticket.request.time_taken_seconds,
        })
        .await;

        let evaluator = Arc::clone(&self.evaluator);
        let replies = self.evaluations_tx.clone();
        let timeout = self.evaluation_timeout;
        tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, evaluator.evaluate(&ticket.request))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(EvaluationError::Timeout(timeout.as_secs())),
            };
            if replies.send((ticket, result)).is_err() {
                trace!("Play ended before evaluation returned");
            }
        });
    }

    async fn handle_timer_event(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Tick {
                epoch,
                remaining_seconds,
            } => match self.machine.timer_tick(epoch, remaining_seconds) {
                Ok(()) => self.publish(),
                Err(reason) => trace!(reason = %reason, "Tick ignored"),
            },
            TimerEvent::Expired { epoch } => {
                let outcome = match self.machine.timer_expired(epoch).cloned() {
                    Ok(outcome) => outcome,
                    Err(reason) => {
                        debug!(reason = %reason, "Expiry ignored");
                        return;
                    }
                };

                self.active_timer = None;
                info!(question_id = %outcome.question_id, "Question timed out");
                self.record_outcome(outcome).await;
                self.publish();
            }
        }
    }

    async fn handle_evaluation(
        &mut self,
        ticket: EvaluationTicket,
        result: Result<EvaluationResult, EvaluationError>,
    ) {
        let failure = result.as_ref().err().map(ToString::to_string);

        let outcome = match self.machine.resolve_evaluation(&ticket, result).cloned() {
            Ok(outcome) => outcome,
            Err(reason) => {
                debug!(reason = %reason, "Evaluation result discarded");
                return;
            }
        };

        if let (Resolution::EvaluationFailed, Some(error)) = (outcome.resolution, failure) {
            warn!(question_id = %outcome.question_id, error = %error, "Evaluation failed");
            self.emit(SessionEvent::EvaluationFailed {
                play_id: self.play_id.clone(),
                question_id: outcome.question_id.clone(),
                error,
            })
            .await;
        }

        self.record_outcome(outcome).await;
        self.publish();
    }

    async fn record_outcome(&self, outcome: QuestionOutcome) {
        debug!(
            question_id = %outcome.question_id,
            is_correct = outcome.is_correct,
            score_awarded = outcome.score_awarded,
            resolution = %outcome.resolution,
            "Outcome recorded"
        );
        self.emit(SessionEvent::OutcomeRecorded {
            play_id: self.play_id.clone(),
            outcome,
            total_score: self.machine.state().total_score(),
        })
        .await;
    }

    async fn arm_timer(&mut self, arm: TimerArm) {
        self.active_timer = Some(self.timer.start(arm.duration_seconds, arm.epoch));

        let question_id = self
            .machine
            .current_question()
            .map(|q| q.id.clone())
            .unwrap_or_default();
        self.emit(SessionEvent::QuestionStarted {
            play_id: self.play_id.clone(),
            question_index: arm.question_index,
            question_id,
            time_limit_seconds: arm.duration_seconds,
        })
        .await;
    }

    async fn emit(&self, event: SessionEvent) {
        self.event_bus.emit_to_play(&self.play_id, event).await;
    }

    fn publish(&self) {
        self.snapshots
            .send_replace(SessionSnapshot::capture(&self.play_id, &self.machine));
    }
}
