use std::time::Duration;
use tokio::time::interval;
use tracing::{info, instrument};

use super::manager::PlayManager;
use crate::config::CleanupConfig;

/// Starts the background task that periodically unmounts idle plays
#[instrument(skip(play_manager))]
pub async fn start_cleanup_task(play_manager: PlayManager, config: CleanupConfig) {
    info!(
        cleanup_interval_secs = config.cleanup_interval.as_secs(),
        inactivity_threshold_secs = config.inactivity_threshold.as_secs(),
        "Starting play cleanup background task"
    );

    let mut cleanup_interval = interval(config.cleanup_interval);

    loop {
        cleanup_interval.tick().await;

        let removed = cleanup_inactive_plays(&play_manager, config.inactivity_threshold).await;
        if removed > 0 {
            info!(removed_count = removed, "Play cleanup completed");
        }
    }
}

/// Removes plays that have been inactive for longer than the threshold
#[instrument(skip(play_manager))]
pub async fn cleanup_inactive_plays(
    play_manager: &PlayManager,
    inactivity_threshold: Duration,
) -> usize {
    let inactive_play_ids = play_manager.get_inactive_plays(inactivity_threshold).await;

    if inactive_play_ids.is_empty() {
        return 0;
    }

    info!(
        count = inactive_play_ids.len(),
        "Found inactive plays to remove"
    );

    let mut removed_count = 0;
    for play_id in inactive_play_ids {
        if play_manager.remove_play(&play_id).await {
            removed_count += 1;
            info!(play_id = %play_id, "Removed inactive play");
        }
    }

    removed_count
}
