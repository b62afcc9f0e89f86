//! Board model: the territory grid plus the two line lattices.
//!
//! Pure data with bounds-checked accessors. Rules live in [`crate::rules`].

use crate::error::BoundsError;
use crate::position::{Coord, EdgeId, Orientation};
use crate::{Element, PlayerId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Whether a territory has been claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerritoryState {
    /// Nobody owns the territory.
    Empty,
    /// A player owns the territory.
    Claimed,
}

/// Ownership record of a claimed territory.
///
/// Owner and element only exist together with a garrison, so a territory
/// is claimed exactly when it carries a `Claim`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    /// Owning player.
    pub owner: PlayerId,
    /// Garrisoned armies; at least 1 for a consistent board.
    pub army: u32,
    /// Element stamped at capture time.
    pub element: Element,
}

impl Claim {
    /// Creates a claim.
    pub const fn new(owner: PlayerId, army: u32, element: Element) -> Self {
        Self {
            owner,
            army,
            element,
        }
    }
}

/// One grid square: the unit of ownership and army garrison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Territory {
    coord: Coord,
    claim: Option<Claim>,
}

impl Territory {
    /// Creates an empty territory.
    pub fn empty(coord: Coord) -> Self {
        Self { coord, claim: None }
    }

    /// Creates a claimed territory.
    pub fn claimed(coord: Coord, claim: Claim) -> Self {
        Self {
            coord,
            claim: Some(claim),
        }
    }

    /// Position on the grid.
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Empty or claimed.
    pub fn state(&self) -> TerritoryState {
        match self.claim {
            Some(_) => TerritoryState::Claimed,
            None => TerritoryState::Empty,
        }
    }

    /// Ownership record, if claimed.
    pub fn claim(&self) -> Option<&Claim> {
        self.claim.as_ref()
    }

    /// Owning player, if claimed.
    pub fn owner(&self) -> Option<PlayerId> {
        self.claim.map(|c| c.owner)
    }

    /// Garrison size; zero for an empty territory.
    pub fn army_count(&self) -> u32 {
        self.claim.map_or(0, |c| c.army)
    }

    /// Element tag, if claimed.
    pub fn element(&self) -> Option<Element> {
        self.claim.map(|c| c.element)
    }

    /// True when nobody owns the territory.
    pub fn is_empty(&self) -> bool {
        self.claim.is_none()
    }

    /// True when `player` owns the territory.
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner() == Some(player)
    }

    pub(crate) fn claim_mut(&mut self) -> Option<&mut Claim> {
        self.claim.as_mut()
    }

    pub(crate) fn set_claim(&mut self, claim: Option<Claim>) {
        self.claim = claim;
    }
}

/// State of a border line. Once drawn a line never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeState {
    /// Not yet drawn.
    Empty,
    /// Drawn by a player.
    Drawn(PlayerId),
}

impl EdgeState {
    /// True once the line has been drawn.
    pub fn is_drawn(self) -> bool {
        matches!(self, EdgeState::Drawn(_))
    }

    /// Player who drew the line.
    pub fn owner(self) -> Option<PlayerId> {
        match self {
            EdgeState::Drawn(p) => Some(p),
            EdgeState::Empty => None,
        }
    }
}

/// Square board of territories with horizontal and vertical line lattices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    /// Territories in row-major order.
    territories: Vec<Territory>,
    /// `(size + 1) × size` horizontal lines, row-major.
    horizontal: Vec<EdgeState>,
    /// `size × (size + 1)` vertical lines, row-major.
    vertical: Vec<EdgeState>,
}

impl Board {
    /// Creates an empty `size × size` board with no lines drawn.
    #[instrument]
    pub fn new(size: usize) -> Self {
        let territories = (0..size)
            .flat_map(|y| (0..size).map(move |x| Territory::empty(Coord::new(x, y))))
            .collect();
        Self {
            size,
            territories,
            horizontal: vec![EdgeState::Empty; (size + 1) * size],
            vertical: vec![EdgeState::Empty; size * (size + 1)],
        }
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of territories (`size²`).
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// True when the coordinate lies on the grid.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.size && coord.y < self.size
    }

    #[track_caller]
    fn cell_index(&self, coord: Coord) -> Result<usize, BoundsError> {
        if self.contains(coord) {
            Ok(coord.y * self.size + coord.x)
        } else {
            Err(BoundsError::new(coord.to_string(), self.size))
        }
    }

    #[track_caller]
    fn edge_index(&self, edge: EdgeId) -> Result<(Orientation, usize), BoundsError> {
        let (cols, rows) = match edge.orientation {
            Orientation::Horizontal => (self.size, self.size + 1),
            Orientation::Vertical => (self.size + 1, self.size),
        };
        if edge.x < cols && edge.y < rows {
            Ok((edge.orientation, edge.y * cols + edge.x))
        } else {
            Err(BoundsError::new(edge.to_string(), self.size))
        }
    }

    /// Territory at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError`] if the coordinate is off the grid.
    #[track_caller]
    pub fn territory(&self, coord: Coord) -> Result<&Territory, BoundsError> {
        let index = self.cell_index(coord)?;
        Ok(&self.territories[index])
    }

    #[track_caller]
    pub(crate) fn territory_mut(&mut self, coord: Coord) -> Result<&mut Territory, BoundsError> {
        let index = self.cell_index(coord)?;
        Ok(&mut self.territories[index])
    }

    /// Replaces the ownership record of the territory at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError`] if the coordinate is off the grid.
    #[track_caller]
    pub fn set_territory(&mut self, coord: Coord, claim: Option<Claim>) -> Result<(), BoundsError> {
        self.territory_mut(coord)?.set_claim(claim);
        Ok(())
    }

    /// State of the line identified by `edge`.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError`] if the edge is off the lattice.
    #[track_caller]
    pub fn edge(&self, edge: EdgeId) -> Result<EdgeState, BoundsError> {
        let (orientation, index) = self.edge_index(edge)?;
        Ok(match orientation {
            Orientation::Horizontal => self.horizontal[index],
            Orientation::Vertical => self.vertical[index],
        })
    }

    /// Overwrites the state of the line identified by `edge`.
    ///
    /// This is the raw primitive; the line-drawing rules are what keep lines
    /// monotonic.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError`] if the edge is off the lattice.
    #[track_caller]
    pub fn set_edge(&mut self, edge: EdgeId, state: EdgeState) -> Result<(), BoundsError> {
        let (orientation, index) = self.edge_index(edge)?;
        match orientation {
            Orientation::Horizontal => self.horizontal[index] = state,
            Orientation::Vertical => self.vertical[index] = state,
        }
        Ok(())
    }

    /// The four lines bounding a territory: top, bottom, left, right.
    pub fn bounding_edges(coord: Coord) -> [EdgeId; 4] {
        [
            EdgeId::horizontal(coord.x, coord.y),
            EdgeId::horizontal(coord.x, coord.y + 1),
            EdgeId::vertical(coord.x, coord.y),
            EdgeId::vertical(coord.x + 1, coord.y),
        ]
    }

    /// Number of drawn lines around a territory.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError`] if the coordinate is off the grid.
    #[track_caller]
    pub fn drawn_sides(&self, coord: Coord) -> Result<usize, BoundsError> {
        self.cell_index(coord)?;
        let mut drawn = 0;
        for edge in Self::bounding_edges(coord) {
            if self.edge(edge)?.is_drawn() {
                drawn += 1;
            }
        }
        Ok(drawn)
    }

    /// True when all four bounding lines of a territory are drawn.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError`] if the coordinate is off the grid.
    #[track_caller]
    pub fn is_enclosed(&self, coord: Coord) -> Result<bool, BoundsError> {
        Ok(self.drawn_sides(coord)? == 4)
    }

    /// All territories in row-major order.
    pub fn territories(&self) -> impl Iterator<Item = &Territory> {
        self.territories.iter()
    }

    /// Territories owned by `player`.
    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = &Territory> {
        self.territories.iter().filter(move |t| t.is_owned_by(player))
    }

    /// Number of claimed territories.
    pub fn claimed_count(&self) -> usize {
        self.territories.iter().filter(|t| !t.is_empty()).count()
    }

    /// Every edge id on the board: horizontal lattice first, then vertical,
    /// each in row-major order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        let size = self.size;
        let horizontal = (0..=size).flat_map(move |y| (0..size).map(move |x| EdgeId::horizontal(x, y)));
        let vertical = (0..size).flat_map(move |y| (0..=size).map(move |x| EdgeId::vertical(x, y)));
        horizontal.chain(vertical)
    }

    /// Every edge with its state, in [`Board::edge_ids`] order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, EdgeState)> + '_ {
        self.edge_ids()
            .zip(self.horizontal.iter().chain(self.vertical.iter()).copied())
    }

    /// Edges not yet drawn, in [`Board::edge_ids`] order.
    pub fn empty_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges()
            .filter(|(_, state)| !state.is_drawn())
            .map(|(id, _)| id)
    }

    /// Renders the board as text: `+` grid points, `-`/`|` drawn lines,
    /// territory owner digits (or `.` when empty).
    pub fn display(&self) -> String {
        let mut out = String::new();
        for y in 0..=self.size {
            for x in 0..self.size {
                out.push('+');
                let drawn = self
                    .edge(EdgeId::horizontal(x, y))
                    .map(EdgeState::is_drawn)
                    .unwrap_or(false);
                out.push(if drawn { '-' } else { ' ' });
            }
            out.push_str("+\n");
            if y == self.size {
                break;
            }
            for x in 0..=self.size {
                let drawn = self
                    .edge(EdgeId::vertical(x, y))
                    .map(EdgeState::is_drawn)
                    .unwrap_or(false);
                out.push(if drawn { '|' } else { ' ' });
                if x < self.size {
                    let symbol = self
                        .territory(Coord::new(x, y))
                        .ok()
                        .and_then(Territory::owner)
                        .and_then(|p| char::from_digit(p as u32, 10))
                        .unwrap_or('.');
                    out.push(symbol);
                }
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_sizes() {
        let board = Board::new(3);
        assert_eq!(board.territories().count(), 9);
        assert_eq!(board.edge_ids().count(), 2 * 3 * 4);
        assert_eq!(board.empty_edges().count(), 24);
        assert!(board.edge(EdgeId::horizontal(2, 3)).is_ok());
        assert!(board.edge(EdgeId::horizontal(3, 0)).is_err());
        assert!(board.edge(EdgeId::vertical(3, 2)).is_ok());
        assert!(board.edge(EdgeId::vertical(0, 3)).is_err());
    }

    #[test]
    fn test_out_of_bounds_territory() {
        let board = Board::new(4);
        let err = board.territory(Coord::new(4, 0)).unwrap_err();
        assert_eq!(err.grid_size, 4);
    }

    #[test]
    fn test_set_and_read_edge() {
        let mut board = Board::new(2);
        board.set_edge(EdgeId::vertical(2, 1), EdgeState::Drawn(1)).unwrap();
        assert_eq!(board.edge(EdgeId::vertical(2, 1)).unwrap(), EdgeState::Drawn(1));
        assert_eq!(board.edge(EdgeId::vertical(1, 1)).unwrap(), EdgeState::Empty);
    }

    #[test]
    fn test_edges_align_with_ids() {
        let mut board = Board::new(2);
        let target = EdgeId::vertical(1, 1);
        board.set_edge(target, EdgeState::Drawn(0)).unwrap();
        let drawn: Vec<_> = board.edges().filter(|(_, s)| s.is_drawn()).collect();
        assert_eq!(drawn, vec![(target, EdgeState::Drawn(0))]);
    }

    #[test]
    fn test_enclosure() {
        let mut board = Board::new(3);
        let cell = Coord::new(1, 1);
        for edge in Board::bounding_edges(cell).into_iter().take(3) {
            board.set_edge(edge, EdgeState::Drawn(0)).unwrap();
        }
        assert_eq!(board.drawn_sides(cell).unwrap(), 3);
        assert!(!board.is_enclosed(cell).unwrap());
        board.set_edge(EdgeId::vertical(2, 1), EdgeState::Drawn(0)).unwrap();
        assert!(board.is_enclosed(cell).unwrap());
    }

    #[test]
    fn test_claim_accessors() {
        let mut board = Board::new(2);
        let cell = Coord::new(0, 1);
        board
            .set_territory(cell, Some(Claim::new(1, 4, Element::Water)))
            .unwrap();
        let t = board.territory(cell).unwrap();
        assert_eq!(t.state(), TerritoryState::Claimed);
        assert_eq!(t.owner(), Some(1));
        assert_eq!(t.army_count(), 4);
        assert_eq!(t.element(), Some(Element::Water));
        assert_eq!(board.claimed_count(), 1);
        assert_eq!(board.owned_by(1).count(), 1);
    }

    #[test]
    fn test_display_shows_lines_and_owners() {
        let mut board = Board::new(1);
        for edge in Board::bounding_edges(Coord::new(0, 0)) {
            board.set_edge(edge, EdgeState::Drawn(0)).unwrap();
        }
        board
            .set_territory(Coord::new(0, 0), Some(Claim::new(0, 1, Element::Fire)))
            .unwrap();
        assert_eq!(board.display(), "+-+\n|0|\n+-+\n");
    }
}
