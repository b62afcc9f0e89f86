//! Line drawing and square completion.

use crate::action::MoveError;
use crate::board::{Board, Claim, EdgeState};
use crate::position::{Coord, EdgeId};
use crate::Player;
use tracing::{debug, info, instrument};

/// Checks that `edge` exists and has not been drawn.
///
/// # Errors
///
/// [`MoveError::EdgeAlreadyDrawn`] for a drawn line, [`MoveError::Bounds`]
/// for an edge off the lattice.
#[instrument(skip(board))]
pub fn validate_line(board: &Board, edge: EdgeId) -> Result<(), MoveError> {
    match board.edge(edge)? {
        EdgeState::Drawn(_) => Err(MoveError::EdgeAlreadyDrawn(edge)),
        EdgeState::Empty => Ok(()),
    }
}

/// Number of still-empty territories that drawing `edge` would enclose.
///
/// # Errors
///
/// [`MoveError::Bounds`] for an edge off the lattice.
#[instrument(skip(board))]
pub fn completions(board: &Board, edge: EdgeId) -> Result<usize, MoveError> {
    if board.edge(edge)?.is_drawn() {
        return Ok(0);
    }
    let mut count = 0;
    for cell in edge.adjacent_cells(board.size()) {
        if board.territory(cell)?.is_empty() && board.drawn_sides(cell)? == 3 {
            count += 1;
        }
    }
    Ok(count)
}

/// Draws `edge` for `player` and claims every territory it encloses.
///
/// Each of the (at most two) territories beside the line is evaluated on its
/// own: if all four of its sides are now drawn and nobody owns it, it
/// becomes the player's with one army and the player's element.
///
/// Returns the claimed territories.
///
/// # Errors
///
/// See [`validate_line`]. Nothing changes on error.
#[instrument(skip(board, player), fields(player = player.id()))]
pub fn draw_line(board: &mut Board, player: &mut Player, edge: EdgeId) -> Result<Vec<Coord>, MoveError> {
    validate_line(board, edge)?;
    let id = *player.id();
    let element = *player.element();

    board.set_edge(edge, EdgeState::Drawn(id))?;

    let mut claimed = Vec::new();
    for cell in edge.adjacent_cells(board.size()) {
        if board.is_enclosed(cell)? && board.territory(cell)?.is_empty() {
            board.set_territory(cell, Some(Claim::new(id, 1, element)))?;
            claimed.push(cell);
        }
    }

    player.gain_territories(claimed.len() as u32);
    if claimed.is_empty() {
        debug!(%edge, "Line drawn");
    } else {
        info!(%edge, claimed = claimed.len(), "Line completed territory");
    }
    Ok(claimed)
}
