// Concurrent projection of a whole roster.
//
// Each player is projected on tokio's blocking pool. The projector is shared
// read-only, so tasks need no coordination; results are slotted back into
// roster order once every task has finished.

use pitchcast_core::{Player, ScoringProfile};
use pitchcast_football::{ProjectionResult, Projector};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::input::HistoryIndex;

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("projection task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("projection task for index {0} produced no result")]
    Missing(usize),
}

/// Project every player in `players`, returning results in the same order.
pub async fn run_batch(
    projector: Arc<Projector>,
    players: Vec<Player>,
    history: Arc<HistoryIndex>,
    profile: Arc<ScoringProfile>,
) -> Result<Vec<ProjectionResult>, BatchError> {
    let count = players.len();
    info!("Projecting {} players", count);

    let mut tasks = JoinSet::new();
    for (index, player) in players.into_iter().enumerate() {
        let projector = Arc::clone(&projector);
        let history = Arc::clone(&history);
        let profile = Arc::clone(&profile);
        tasks.spawn_blocking(move || {
            let seasons = history.get(&player.id).map(Vec::as_slice).unwrap_or(&[]);
            (index, projector.project(&player, seasons, &profile))
        });
    }

    let mut slots: Vec<Option<ProjectionResult>> = vec![None; count];
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined?;
        debug!("finished {} ({})", result.player_id, index);
        slots[index] = Some(result);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.ok_or(BatchError::Missing(index)))
        .collect()
}

/// The `n` highest projected totals, best first. Ties keep roster order.
pub fn top_n(results: &[ProjectionResult], n: usize) -> Vec<&ProjectionResult> {
    let mut ranked: Vec<&ProjectionResult> = results.iter().collect();
    ranked.sort_by(|a, b| b.total_fantasy_points.total_cmp(&a.total_fantasy_points));
    ranked.truncate(n);
    ranked
}
