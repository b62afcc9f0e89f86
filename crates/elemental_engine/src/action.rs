//! First-class actions and their outcomes.
//!
//! Actions are domain events: they carry the player's intent and are
//! validated by the session before anything on the board changes.

use crate::error::BoundsError;
use crate::position::{Coord, EdgeId};
use crate::{Element, PlayerId};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Per-turn mode selecting which action type is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    /// Drawing border lines.
    #[default]
    Drawing,
    /// Moving armies.
    Army,
}

impl Phase {
    /// The other phase.
    pub fn toggled(self) -> Self {
        match self {
            Phase::Drawing => Phase::Army,
            Phase::Army => Phase::Drawing,
        }
    }
}

/// What a player does with their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Draw a border line.
    DrawLine(EdgeId),
    /// Move armies from one territory into another.
    MoveArmy {
        /// Source territory (must be owned by the mover).
        from: Coord,
        /// Target territory.
        to: Coord,
    },
    /// Do nothing this turn.
    Pass,
}

impl Action {
    /// The phase in which this action is legal, if it needs one.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Action::DrawLine(_) => Some(Phase::Drawing),
            Action::MoveArmy { .. } => Some(Phase::Army),
            Action::Pass => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::DrawLine(edge) => write!(f, "draw {}", edge),
            Action::MoveArmy { from, to } => write!(f, "move {} -> {}", from, to),
            Action::Pass => write!(f, "pass"),
        }
    }
}

/// An action attributed to the player attempting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct PlayerMove {
    /// Who is acting.
    pub player: PlayerId,
    /// What they are doing.
    pub action: Action,
}

/// A rejected or failed move.
///
/// Everything except [`MoveError::Bounds`] and
/// [`MoveError::InvariantViolation`] is a recoverable no-op: the board is
/// untouched and the caller may re-prompt.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The session already has a winner.
    #[display("Game is already over")]
    GameOver,

    /// Someone other than the current player tried to act.
    #[display("It's not player {}'s turn", _0)]
    NotYourTurn(PlayerId),

    /// The current turn already has its move.
    #[display("A move has already been made this turn")]
    TurnAlreadyCommitted,

    /// The action belongs to the other phase.
    #[display("Action requires the {} phase, current phase is {}", expected, actual)]
    WrongPhase {
        /// Phase the action needs.
        expected: Phase,
        /// Phase the session is in.
        actual: Phase,
    },

    /// The line is already drawn.
    #[display("Line {} is already drawn", _0)]
    EdgeAlreadyDrawn(EdgeId),

    /// The source territory is not the mover's.
    #[display("Territory {} is not owned by the mover", _0)]
    NotOwner(Coord),

    /// The source territory cannot spare an army.
    #[display("Territory {} has {} armies; at least 2 are needed to move", coord, army)]
    InsufficientArmy {
        /// Source territory.
        coord: Coord,
        /// Armies garrisoned there.
        army: u32,
    },

    /// The target is out of the mover's reach.
    #[display("Territory {} is out of reach from {}", to, from)]
    NotAdjacent {
        /// Source territory.
        from: Coord,
        /// Target territory.
        to: Coord,
    },

    /// A coordinate fell off the board.
    #[display("{}", _0)]
    Bounds(BoundsError),

    /// A postcondition failed.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl MoveError {
    /// True for programmer faults that must not be shown as a player mistake.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MoveError::Bounds(_) | MoveError::InvariantViolation(_))
    }
}

impl std::error::Error for MoveError {}

impl From<BoundsError> for MoveError {
    fn from(err: BoundsError) -> Self {
        MoveError::Bounds(err)
    }
}

/// Result of a line draw.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct LineOutcome {
    /// The drawn line.
    edge: EdgeId,
    /// Territories claimed by this draw (zero, one or two).
    claimed_cells: Vec<Coord>,
}

impl LineOutcome {
    /// Number of territories claimed by this draw.
    pub fn claimed_count(&self) -> usize {
        self.claimed_cells.len()
    }
}

/// How an army move resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum BattleOutcome {
    /// The target changed hands (it was empty or the attacker won).
    Captured,
    /// The defender held.
    Repelled,
    /// Armies moved into a territory the mover already owned.
    Reinforced,
}

/// Result of an army move.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct ArmyOutcome {
    /// How the move resolved.
    outcome: BattleOutcome,
    /// Source territory.
    from: Coord,
    /// Target territory.
    to: Coord,
    /// Attacking strength after element bonuses.
    attack_power: u32,
    /// Defending strength after element bonuses (zero unless a battle was fought).
    defend_power: u32,
    /// Armies left in the source territory.
    from_army: u32,
    /// Armies in the target territory after resolution.
    to_army: u32,
    /// Territories claimed by fire spread.
    spread: Vec<Coord>,
}

/// A territory regenerated by an earth player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct RegenEvent {
    /// Earth territory the growth came from.
    pub source: Coord,
    /// Newly claimed territory.
    pub claimed: Coord,
}

/// What happened at the start of a player's turn.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct TurnReport {
    /// Player whose turn begins.
    next_player: PlayerId,
    /// Element of that player.
    element: Element,
    /// Armies added to the free pool.
    armies_gained: u32,
    /// Earth regeneration claims.
    regen_events: Vec<RegenEvent>,
    /// Armies added to each owned territory.
    reinforce_per_tile: u32,
    /// Number of territories reinforced.
    reinforced_tiles: u32,
}

impl TurnReport {
    /// Total armies added to territories by reinforcement.
    pub fn reinforce_delta(&self) -> u32 {
        self.reinforce_per_tile * self.reinforced_tiles
    }
}

/// Result of any committed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// A line was drawn.
    Line(LineOutcome),
    /// Armies moved.
    Army(ArmyOutcome),
    /// The player passed.
    Passed,
}
