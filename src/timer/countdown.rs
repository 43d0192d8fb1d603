use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

const TICK: Duration = Duration::from_secs(1);

/// Notifications produced by a running countdown
///
/// Every event carries the epoch the countdown was started with, so the receiver
/// can discard notifications that belong to a question it has already left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed; display only
    Tick { epoch: u64, remaining_seconds: u32 },
    /// The countdown reached zero
    Expired { epoch: u64 },
}

impl TimerEvent {
    pub fn epoch(&self) -> u64 {
        match self {
            TimerEvent::Tick { epoch, .. } => *epoch,
            TimerEvent::Expired { epoch } => *epoch,
        }
    }
}

/// Starts per-question countdowns that report into a single channel
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    events: mpsc::UnboundedSender<TimerEvent>,
}

impl CountdownTimer {
    pub fn new(events: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self { events }
    }

    /// Start a countdown of `duration_seconds` tagged with `epoch`
    ///
    /// Emits `Expired` exactly once unless the returned handle is cancelled or
    /// dropped first.
    pub fn start(&self, duration_seconds: u32, epoch: u64) -> TimerHandle {
        let started_at = Instant::now();
        let events = self.events.clone();

        debug!(epoch = epoch, duration_seconds = duration_seconds, "Starting countdown");

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(started_at + TICK, TICK);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut remaining = duration_seconds;
            while remaining > 0 {
                ticker.tick().await;
                remaining -= 1;

                if remaining > 0 {
                    let tick = TimerEvent::Tick {
                        epoch,
                        remaining_seconds: remaining,
                    };
                    if events.send(tick).is_err() {
                        trace!(epoch = epoch, "Countdown receiver gone");
                        return;
                    }
                }
            }

            debug!(epoch = epoch, "Countdown expired");
            let _ = events.send(TimerEvent::Expired { epoch });
        });

        TimerHandle {
            epoch,
            started_at,
            task,
        }
    }
}

/// Handle to a running countdown; dropping it cancels the countdown
#[derive(Debug)]
pub struct TimerHandle {
    epoch: u64,
    started_at: Instant,
    task: JoinHandle<()>,
}

impl TimerHandle {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whole seconds since the countdown started
    pub fn elapsed_seconds(&self) -> u32 {
        u32::try_from(self.started_at.elapsed().as_secs()).unwrap_or(u32::MAX)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn cancel(self) {
        debug!(epoch = self.epoch, "Cancelling countdown");
        self.task.abort();
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
