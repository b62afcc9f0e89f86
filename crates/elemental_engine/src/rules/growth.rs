//! Start-of-turn effects: army pool growth, earth regeneration and
//! reinforcement.

use super::roster_mut;
use crate::action::{MoveError, RegenEvent, TurnReport};
use crate::board::{Board, Claim};
use crate::element::EARTH_REGEN_CHANCE;
use crate::position::Coord;
use crate::rng::RandomSource;
use crate::{Element, Player, PlayerId};
use tracing::{debug, info, instrument};

/// Adds `max(1, territories / 3)` armies to the player's pool.
///
/// Returns the amount added.
#[instrument(skip(player), fields(player = player.id()))]
pub fn grow_armies(player: &mut Player) -> u32 {
    let gained = (*player.territories() / 3).max(1);
    player.grow_armies(gained);
    gained
}

/// Lets an earth player's earth territories spread into empty neighbours.
///
/// Sources are fixed before any growth, so a freshly claimed tile does not
/// seed further growth this turn. Each empty orthogonal neighbour of a source
/// is rolled in order until one succeeds; a source grows at most once.
///
/// Players of any other element get no regeneration.
#[instrument(skip(board, player, rng), fields(player = player.id()))]
pub fn regenerate_earth(
    board: &mut Board,
    player: &mut Player,
    rng: &mut dyn RandomSource,
) -> Result<Vec<RegenEvent>, MoveError> {
    if !player.element().regenerates() {
        return Ok(Vec::new());
    }
    let id = *player.id();
    let sources: Vec<Coord> = board
        .owned_by(id)
        .filter(|t| t.element() == Some(Element::Earth))
        .map(|t| t.coord())
        .collect();

    let mut events = Vec::new();
    for source in sources {
        for neighbor in source.orthogonal_neighbors(board.size()) {
            if !board.territory(neighbor)?.is_empty() {
                continue;
            }
            if rng.chance(EARTH_REGEN_CHANCE) {
                board.set_territory(neighbor, Some(Claim::new(id, 1, Element::Earth)))?;
                events.push(RegenEvent::new(source, neighbor));
                break;
            }
        }
    }

    player.gain_territories(events.len() as u32);
    if !events.is_empty() {
        info!(regenerated = events.len(), "Earth regenerated");
    }
    Ok(events)
}

/// Adds the player's per-tile reinforcement to every territory they own.
///
/// Returns `(per_tile, tiles)`.
#[instrument(skip(board, player), fields(player = player.id()))]
pub fn reinforce(board: &mut Board, player: &Player) -> Result<(u32, u32), MoveError> {
    let id = *player.id();
    let per_tile = player.element().reinforcement();
    let owned: Vec<Coord> = board.owned_by(id).map(|t| t.coord()).collect();
    for coord in &owned {
        if let Some(claim) = board.territory_mut(*coord)?.claim_mut() {
            claim.army += per_tile;
        }
    }
    debug!(per_tile, tiles = owned.len(), "Territories reinforced");
    Ok((per_tile, owned.len() as u32))
}

/// Runs every start-of-turn effect for `next`, in order: pool growth, earth
/// regeneration, reinforcement.
///
/// Regenerated tiles are owned by the time reinforcement runs, so they are
/// reinforced too.
#[instrument(skip(board, players, rng))]
pub fn start_turn(
    board: &mut Board,
    players: &mut [Player],
    next: PlayerId,
    rng: &mut dyn RandomSource,
) -> Result<TurnReport, MoveError> {
    let player = roster_mut(players, next)?;
    let armies_gained = grow_armies(player);
    let regen_events = regenerate_earth(board, player, rng)?;
    let (per_tile, tiles) = reinforce(board, player)?;
    Ok(TurnReport::new(
        next,
        *player.element(),
        armies_gained,
        regen_events,
        per_tile,
        tiles,
    ))
}
