//! Army movement and combat resolution.

use super::roster_mut;
use crate::action::{ArmyOutcome, BattleOutcome, MoveError};
use crate::board::{Board, Claim, Territory};
use crate::position::Coord;
use crate::{Element, Player, PlayerId};
use tracing::{debug, info, instrument};

/// Whether `to` is within `element`'s reach of `from`.
///
/// Everyone reaches the four orthogonal neighbours. Wind additionally
/// reaches two steps along an axis and the four diagonals.
pub fn in_reach(element: Element, from: Coord, to: Coord) -> bool {
    let (dx, dy) = from.delta(to);
    if element.has_extended_reach() {
        matches!((dx, dy), (1, 0) | (0, 1) | (2, 0) | (0, 2) | (1, 1))
    } else {
        dx + dy == 1
    }
}

/// Every on-board coordinate `element` can reach from `from`.
pub fn reach(element: Element, from: Coord, size: usize) -> Vec<Coord> {
    let mut targets = Vec::new();
    for dy in -2isize..=2 {
        for dx in -2isize..=2 {
            if let Some(to) = from.offset(dx, dy, size) {
                if in_reach(element, from, to) {
                    targets.push(to);
                }
            }
        }
    }
    targets
}

/// Strength of an attack launched from a territory holding `army`.
///
/// One army always stays behind; wind adds its bonus.
pub fn attack_power(army: u32, element: Element) -> u32 {
    army.saturating_sub(1) + element.attack_bonus()
}

/// Strength with which `territory` resists an attack.
///
/// Water territories add their bonus. Empty territories defend with zero.
pub fn defend_power(territory: &Territory) -> u32 {
    match territory.claim() {
        Some(claim) => claim.army + claim.element.defense_bonus(),
        None => 0,
    }
}

/// Checks that `mover` may send armies from `from` to `to`.
///
/// # Errors
///
/// - [`MoveError::NotOwner`] if `from` is not the mover's
/// - [`MoveError::InsufficientArmy`] if `from` holds a single army
/// - [`MoveError::NotAdjacent`] if `to` is out of reach
/// - [`MoveError::Bounds`] if either coordinate is off the board
#[instrument(skip(board))]
pub fn validate_army_move(
    board: &Board,
    mover: PlayerId,
    element: Element,
    from: Coord,
    to: Coord,
) -> Result<(), MoveError> {
    let source = board.territory(from)?;
    if !source.is_owned_by(mover) {
        return Err(MoveError::NotOwner(from));
    }
    if source.army_count() <= 1 {
        return Err(MoveError::InsufficientArmy {
            coord: from,
            army: source.army_count(),
        });
    }
    board.territory(to)?;
    if !in_reach(element, from, to) {
        return Err(MoveError::NotAdjacent { from, to });
    }
    Ok(())
}

/// Moves armies from `from` into `to` and resolves the result.
///
/// - Empty target: captured with the full attack power.
/// - Own target: reinforced by the attack power and re-aligned to the
///   mover's element.
/// - Enemy target: a battle. A strictly stronger attack captures it with the
///   difference. Otherwise the defender holds with the difference, and never
///   fewer than one army.
///
/// The source always keeps one army. A fire mover that captures or
/// reinforces then claims each empty orthogonal neighbour of `to` with one
/// army; spread does not cascade.
///
/// # Errors
///
/// See [`validate_army_move`]. Nothing changes on error.
#[instrument(skip(board, players))]
pub fn move_army(
    board: &mut Board,
    players: &mut [Player],
    mover: PlayerId,
    from: Coord,
    to: Coord,
) -> Result<ArmyOutcome, MoveError> {
    let element = *roster_mut(players, mover)?.element();
    validate_army_move(board, mover, element, from, to)?;

    let attack = attack_power(board.territory(from)?.army_count(), element);
    let target = board.territory(to)?.clone();
    let defend = defend_power(&target);

    let (outcome, to_army) = match target.claim() {
        None => {
            board.set_territory(to, Some(Claim::new(mover, attack, element)))?;
            roster_mut(players, mover)?.gain_territories(1);
            (BattleOutcome::Captured, attack)
        }
        Some(claim) if claim.owner == mover => {
            let army = claim.army + attack;
            board.set_territory(to, Some(Claim::new(mover, army, element)))?;
            (BattleOutcome::Reinforced, army)
        }
        Some(claim) => {
            if attack > defend {
                let army = attack - defend;
                board.set_territory(to, Some(Claim::new(mover, army, element)))?;
                roster_mut(players, claim.owner)?.lose_territory();
                roster_mut(players, mover)?.gain_territories(1);
                (BattleOutcome::Captured, army)
            } else {
                let army = (defend - attack).max(1);
                board.set_territory(to, Some(Claim::new(claim.owner, army, claim.element)))?;
                (BattleOutcome::Repelled, army)
            }
        }
    };

    if let Some(source) = board.territory_mut(from)?.claim_mut() {
        source.army = 1;
    }

    let spread = if element.spreads_on_capture() && outcome != BattleOutcome::Repelled {
        spread_fire(board, mover, to)?
    } else {
        Vec::new()
    };
    roster_mut(players, mover)?.gain_territories(spread.len() as u32);

    match outcome {
        BattleOutcome::Repelled => debug!(%from, %to, attack, defend, "Attack repelled"),
        _ => info!(%from, %to, %outcome, attack, defend, spread = spread.len(), "Army move resolved"),
    }

    let defend_power = if target.claim().is_some_and(|c| c.owner != mover) {
        defend
    } else {
        0
    };
    Ok(ArmyOutcome::new(outcome, from, to, attack, defend_power, 1, to_army, spread))
}

/// Claims every empty orthogonal neighbour of `origin` for a fire mover.
fn spread_fire(board: &mut Board, mover: PlayerId, origin: Coord) -> Result<Vec<Coord>, MoveError> {
    let mut spread = Vec::new();
    for neighbor in origin.orthogonal_neighbors(board.size()) {
        if board.territory(neighbor)?.is_empty() {
            board.set_territory(neighbor, Some(Claim::new(mover, 1, Element::Fire)))?;
            spread.push(neighbor);
        }
    }
    Ok(spread)
}
