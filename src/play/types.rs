use serde::{Deserialize, Serialize};

use crate::catalog::PlayMode;
use crate::engine::SessionSnapshot;

/// Request payload for creating a play
#[derive(Debug, Deserialize)]
pub struct CreatePlayRequest {
    pub game_id: String,
    #[serde(default)]
    pub mode: PlayMode,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePlayResponse {
    pub play_id: String,
    pub snapshot: SessionSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct SelectOptionRequest {
    pub option_id: String,
}
