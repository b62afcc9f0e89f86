//! Contract-based validation for session operations.
//!
//! Contracts formalize Hoare-style reasoning: {P} action {Q}. Preconditions
//! run before every operation; postconditions run in debug builds.

use crate::action::{Action, MoveError, Phase, PlayerMove};
use crate::invariants::{ConquestInvariants, InvariantSet};
use crate::rules;
use crate::session::GameSession;
use tracing::{instrument, warn};

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: no winner has been declared.
pub struct GameActive;

impl GameActive {
    /// Rejects with [`MoveError::GameOver`] after victory.
    #[instrument(skip(game))]
    pub fn check(game: &GameSession) -> Result<(), MoveError> {
        if game.is_over() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the mover is the current player.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects with [`MoveError::NotYourTurn`].
    #[instrument(skip(game))]
    pub fn check(mv: &PlayerMove, game: &GameSession) -> Result<(), MoveError> {
        if mv.player != game.current_player() {
            Err(MoveError::NotYourTurn(mv.player))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the current turn has no committed move yet.
pub struct TurnOpen;

impl TurnOpen {
    /// Rejects with [`MoveError::TurnAlreadyCommitted`].
    #[instrument(skip(game))]
    pub fn check(game: &GameSession) -> Result<(), MoveError> {
        if game.has_committed() {
            Err(MoveError::TurnAlreadyCommitted)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the session is in the phase the action needs.
pub struct PhaseMatches;

impl PhaseMatches {
    /// Rejects with [`MoveError::WrongPhase`].
    #[instrument(skip(game))]
    pub fn check(expected: Phase, game: &GameSession) -> Result<(), MoveError> {
        if game.phase() != expected {
            Err(MoveError::WrongPhase {
                expected,
                actual: game.phase(),
            })
        } else {
            Ok(())
        }
    }
}

/// Composite precondition shared by every move.
pub struct LegalTurn;

impl LegalTurn {
    /// Game active, mover's turn, turn still open, matching phase.
    #[instrument(skip(game))]
    pub fn check(mv: &PlayerMove, expected: Phase, game: &GameSession) -> Result<(), MoveError> {
        GameActive::check(game)?;
        PlayersTurn::check(mv, game)?;
        TurnOpen::check(game)?;
        PhaseMatches::check(expected, game)?;
        Ok(())
    }
}

/// Postcondition: drawn lines never revert or change owner.
pub struct EdgesMonotonic;

impl EdgesMonotonic {
    /// True when every line drawn in `before` is drawn identically in `after`.
    #[instrument(skip(before, after))]
    pub fn holds(before: &GameSession, after: &GameSession) -> bool {
        let valid = before
            .board()
            .edges()
            .zip(after.board().edges())
            .all(|((_, old), (_, new))| !old.is_drawn() || old == new);
        if !valid {
            warn!("Drawn line reverted");
        }
        valid
    }
}

fn check_after(before: &GameSession, after: &GameSession) -> Result<(), MoveError> {
    if !EdgesMonotonic::holds(before, after) {
        return Err(MoveError::InvariantViolation(
            "Postcondition failed: drawn lines never revert".to_string(),
        ));
    }
    ConquestInvariants::check_all(after).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

/// Contract for line draws.
///
/// Preconditions:
/// - Game active, mover's turn, turn open, drawing phase
/// - Line exists and is not drawn
///
/// Postconditions:
/// - Drawn lines never revert
/// - Invariant set holds
pub struct DrawLineContract;

impl Contract<GameSession, PlayerMove> for DrawLineContract {
    fn pre(game: &GameSession, mv: &PlayerMove) -> Result<(), MoveError> {
        LegalTurn::check(mv, Phase::Drawing, game)?;
        match mv.action {
            Action::DrawLine(edge) => rules::validate_line(game.board(), edge),
            other => Err(MoveError::WrongPhase {
                expected: Phase::Drawing,
                actual: other.phase().unwrap_or(game.phase()),
            }),
        }
    }

    fn post(before: &GameSession, after: &GameSession) -> Result<(), MoveError> {
        check_after(before, after)
    }
}

/// Contract for army moves.
///
/// Preconditions:
/// - Game active, mover's turn, turn open, army phase
/// - Source owned by the mover with more than one army
/// - Target within the mover's element reach
///
/// Postconditions:
/// - Drawn lines never revert
/// - Invariant set holds
pub struct MoveArmyContract;

impl Contract<GameSession, PlayerMove> for MoveArmyContract {
    fn pre(game: &GameSession, mv: &PlayerMove) -> Result<(), MoveError> {
        LegalTurn::check(mv, Phase::Army, game)?;
        match mv.action {
            Action::MoveArmy { from, to } => {
                let element = game
                    .player(mv.player)
                    .map(|p| *p.element())
                    .ok_or(MoveError::NotYourTurn(mv.player))?;
                rules::validate_army_move(game.board(), mv.player, element, from, to)
            }
            other => Err(MoveError::WrongPhase {
                expected: Phase::Army,
                actual: other.phase().unwrap_or(game.phase()),
            }),
        }
    }

    fn post(before: &GameSession, after: &GameSession) -> Result<(), MoveError> {
        check_after(before, after)
    }
}

/// Contract for ending a turn.
///
/// Preconditions:
/// - Game active
///
/// Postconditions:
/// - Drawn lines never revert
/// - Invariant set holds
pub struct EndTurnContract;

impl Contract<GameSession, ()> for EndTurnContract {
    fn pre(game: &GameSession, _: &()) -> Result<(), MoveError> {
        GameActive::check(game)
    }

    fn post(before: &GameSession, after: &GameSession) -> Result<(), MoveError> {
        check_after(before, after)
    }
}
