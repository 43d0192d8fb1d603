use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};

use super::driver::SessionIntent;
use super::types::{CreatePlayRequest, CreatePlayResponse, SelectOptionRequest};
use crate::engine::{SessionSnapshot, SessionSummary};
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a play
///
/// POST /plays
#[instrument(name = "create_play", skip(state))]
pub async fn create_play(
    State(state): State<AppState>,
    Json(request): Json<CreatePlayRequest>,
) -> Result<(StatusCode, Json<CreatePlayResponse>), AppError> {
    if request.game_id.trim().is_empty() {
        return Err(AppError::BadRequest("game_id must not be empty".to_string()));
    }

    let play = state
        .play_manager
        .create_play(&request.game_id, request.mode)
        .await?;

    info!(play_id = %play.play_id(), game_id = %request.game_id, "Play ready");

    Ok((
        StatusCode::CREATED,
        Json(CreatePlayResponse {
            play_id: play.play_id().to_string(),
            snapshot: play.snapshot(),
        }),
    ))
}

/// GET /plays/:play_id
#[instrument(name = "get_play", skip(state))]
pub async fn get_play(
    State(state): State<AppState>,
    Path(play_id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let play = state
        .play_manager
        .get_play(&play_id)
        .await
        .ok_or_else(|| play_not_found(&play_id))?;
    Ok(Json(play.snapshot()))
}

/// POST /plays/:play_id/start
pub async fn start_play(
    State(state): State<AppState>,
    Path(play_id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    dispatch(&state, &play_id, SessionIntent::Start).await
}

/// POST /plays/:play_id/select
pub async fn select_option(
    State(state): State<AppState>,
    Path(play_id): Path<String>,
    Json(request): Json<SelectOptionRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let intent = SessionIntent::SelectOption {
        option_id: request.option_id,
    };
    dispatch(&state, &play_id, intent).await
}

/// POST /plays/:play_id/advance
pub async fn advance_play(
    State(state): State<AppState>,
    Path(play_id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    dispatch(&state, &play_id, SessionIntent::Advance).await
}

/// POST /plays/:play_id/restart
pub async fn restart_play(
    State(state): State<AppState>,
    Path(play_id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    dispatch(&state, &play_id, SessionIntent::Restart).await
}

/// GET /plays/:play_id/summary
///
/// Only available once the last question has been left behind.
#[instrument(name = "get_summary", skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    Path(play_id): Path<String>,
) -> Result<Json<SessionSummary>, AppError> {
    let play = state
        .play_manager
        .get_play(&play_id)
        .await
        .ok_or_else(|| play_not_found(&play_id))?;

    play.snapshot()
        .summary
        .map(Json)
        .ok_or_else(|| AppError::Conflict("Session is not complete".to_string()))
}

/// DELETE /plays/:play_id
#[instrument(name = "delete_play", skip(state))]
pub async fn delete_play(
    State(state): State<AppState>,
    Path(play_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.play_manager.remove_play(&play_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(play_not_found(&play_id))
    }
}

#[instrument(skip(state))]
async fn dispatch(
    state: &AppState,
    play_id: &str,
    intent: SessionIntent,
) -> Result<Json<SessionSnapshot>, AppError> {
    let play = state
        .play_manager
        .get_play(play_id)
        .await
        .ok_or_else(|| play_not_found(play_id))?;

    Ok(Json(play.dispatch(intent).await?))
}

fn play_not_found(play_id: &str) -> AppError {
    AppError::NotFound(format!("Play {} not found", play_id))
}
