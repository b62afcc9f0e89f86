//! Victory detection.

use crate::{Player, PlayerId};
use tracing::{info, instrument};

/// Territories needed to win on a board with `cell_count` cells: 60%,
/// rounded down, but at least one.
pub fn win_threshold(cell_count: usize) -> usize {
    (cell_count * 3 / 5).max(1)
}

/// The first player in turn order holding at least [`win_threshold`]
/// territories.
#[instrument(skip(players))]
pub fn check_winner(players: &[Player], cell_count: usize) -> Option<PlayerId> {
    let threshold = win_threshold(cell_count);
    let winner = players
        .iter()
        .find(|p| *p.territories() as usize >= threshold)
        .map(|p| *p.id());
    if let Some(id) = winner {
        info!(winner = id, threshold, "Victory threshold reached");
    }
    winner
}
