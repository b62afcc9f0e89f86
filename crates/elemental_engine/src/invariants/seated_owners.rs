//! Every owner on the board is a seated player.

use super::Invariant;
use crate::session::GameSession;

/// Invariant: territory and line owners name rostered players.
pub struct SeatedOwnersInvariant;

impl Invariant<GameSession> for SeatedOwnersInvariant {
    fn holds(game: &GameSession) -> bool {
        let seats = game.players().len();
        let territories_ok = game
            .board()
            .territories()
            .filter_map(|t| t.owner())
            .all(|owner| owner < seats);
        let edges_ok = game
            .board()
            .edges()
            .filter_map(|(_, state)| state.owner())
            .all(|owner| owner < seats);
        territories_ok && edges_ok
    }

    fn description() -> &'static str {
        "Territory and line owners are seated players"
    }
}
