//! Game rules for elemental conquest.
//!
//! Pure functions over the board and roster. They validate their own
//! rule-level preconditions; turn order and phase gating belong to the
//! session contracts.

pub mod combat;
pub mod growth;
pub mod lines;
pub mod win;

pub use combat::{attack_power, defend_power, in_reach, move_army, reach, validate_army_move};
pub use growth::{grow_armies, regenerate_earth, reinforce, start_turn};
pub use lines::{completions, draw_line, validate_line};
pub use win::{check_winner, win_threshold};

use crate::action::MoveError;
use crate::{Player, PlayerId};

/// Looks up a rostered player by id.
pub(crate) fn roster_mut(players: &mut [Player], id: PlayerId) -> Result<&mut Player, MoveError> {
    players
        .get_mut(id)
        .ok_or_else(|| MoveError::InvariantViolation(format!("player {} is not on the roster", id)))
}
