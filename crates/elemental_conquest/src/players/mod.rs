//! Player trait and implementations.

mod ai;
mod human;

pub use ai::AiPlayer;
pub use human::{CommandError, HumanPlayer, parse_command};

use anyhow::Result;
use elemental_engine::{Action, GameSession, MoveError};

/// A seat that chooses actions.
pub trait Player {
    /// Chooses the next action for the current turn.
    ///
    /// Called at most once per turn for a committing action; the orchestrator
    /// asks again only after a rejection.
    fn choose(&mut self, game: &GameSession) -> Result<Action>;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// True for seats driven by a person.
    fn is_human(&self) -> bool {
        false
    }

    /// Told when the session refused the last chosen action.
    fn notify_rejected(&mut self, _action: &Action, _error: &MoveError) {}
}
