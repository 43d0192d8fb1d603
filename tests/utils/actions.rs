#![allow(dead_code)]

use gameshow::{
    engine::{Phase, SessionSnapshot},
    event::SessionEvent,
    play::SessionIntent,
};

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    pub async fn start(&self) -> SessionSnapshot {
        self.play.dispatch(SessionIntent::Start).await.unwrap()
    }

    pub async fn select(&self, option_id: &str) -> SessionSnapshot {
        self.play
            .dispatch(SessionIntent::SelectOption {
                option_id: option_id.to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn advance(&self) -> SessionSnapshot {
        self.play.dispatch(SessionIntent::Advance).await.unwrap()
    }

    pub async fn restart(&self) -> SessionSnapshot {
        self.play.dispatch(SessionIntent::Restart).await.unwrap()
    }

    /// Wait until the play publishes a snapshot in `phase`
    pub async fn wait_for_phase(&self, phase: Phase) -> SessionSnapshot {
        let mut snapshots = self.play.watch();
        let snapshot = snapshots
            .wait_for(|s| s.phase == phase)
            .await
            .unwrap()
            .clone();
        snapshot
    }

    /// Event types received so far, in order
    pub fn drain_event_types(&mut self) -> Vec<&'static str> {
        let mut types = vec![];
        while let Ok(event) = self.events.try_recv() {
            types.push(event.event_type());
        }
        types
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        let mut events = vec![];
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}
