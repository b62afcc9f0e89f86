//! Player roster entries.

use crate::Element;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Zero-based player id; also the player's seat in turn order.
pub type PlayerId = usize;

/// Armies each player starts with in the free pool.
pub const STARTING_ARMIES: u32 = 3;

/// A player in a conquest session.
///
/// `territories` is kept equal to the number of board cells the player owns;
/// every ownership change in the rules adjusts it.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Seat in turn order.
    id: PlayerId,
    /// Chosen faction.
    element: Element,
    /// Controlled by the heuristic AI.
    is_ai: bool,
    /// Number of territories owned.
    territories: u32,
    /// Free army pool (bookkeeping only, not spendable per tile).
    armies: u32,
}

impl Player {
    /// Creates a player with no territories and the starting army pool.
    #[instrument]
    pub fn new(id: PlayerId, element: Element, is_ai: bool) -> Self {
        Self {
            id,
            element,
            is_ai,
            territories: 0,
            armies: STARTING_ARMIES,
        }
    }

    pub(crate) fn gain_territories(&mut self, count: u32) {
        self.territories += count;
    }

    pub(crate) fn lose_territory(&mut self) {
        self.territories = self.territories.saturating_sub(1);
    }

    pub(crate) fn grow_armies(&mut self, amount: u32) {
        self.armies += amount;
    }

    #[cfg(test)]
    pub(crate) fn set_territories(&mut self, territories: u32) {
        self.territories = territories;
    }
}
