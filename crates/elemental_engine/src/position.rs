//! Grid coordinates for territories and the edges between them.

use serde::{Deserialize, Serialize};

/// A territory coordinate: column `x`, row `y`, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl Coord {
    /// Creates a coordinate.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Offsets the coordinate, returning `None` when the result leaves a
    /// `size × size` grid.
    pub fn offset(self, dx: isize, dy: isize, size: usize) -> Option<Coord> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < size && y < size).then_some(Coord { x, y })
    }

    /// The four orthogonal neighbours that lie inside a `size × size` grid,
    /// in up, down, left, right order.
    pub fn orthogonal_neighbors(self, size: usize) -> Vec<Coord> {
        ORTHOGONAL
            .iter()
            .filter_map(|&(dx, dy)| self.offset(dx, dy, size))
            .collect()
    }

    /// The eight surrounding cells that lie inside a `size × size` grid.
    pub fn surrounding(self, size: usize) -> Vec<Coord> {
        SURROUNDING
            .iter()
            .filter_map(|&(dx, dy)| self.offset(dx, dy, size))
            .collect()
    }

    /// Per-axis distances to another coordinate.
    pub fn delta(self, other: Coord) -> (usize, usize) {
        (self.x.abs_diff(other.x), self.y.abs_diff(other.y))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub(crate) const ORTHOGONAL: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

const SURROUNDING: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Orientation of a border line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Orientation {
    /// Runs left to right, from grid point `(x, y)` to `(x + 1, y)`.
    Horizontal,
    /// Runs top to bottom, from grid point `(x, y)` to `(x, y + 1)`.
    Vertical,
}

/// Identity of a border line.
///
/// Horizontal lines live on a `(size + 1) rows × size columns` lattice,
/// vertical lines on a `size rows × (size + 1) columns` lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId {
    /// Orientation of the line.
    pub orientation: Orientation,
    /// Lattice column.
    pub x: usize,
    /// Lattice row.
    pub y: usize,
}

impl EdgeId {
    /// Creates an edge id.
    pub const fn new(orientation: Orientation, x: usize, y: usize) -> Self {
        Self { orientation, x, y }
    }

    /// Shorthand for a horizontal edge.
    pub const fn horizontal(x: usize, y: usize) -> Self {
        Self::new(Orientation::Horizontal, x, y)
    }

    /// Shorthand for a vertical edge.
    pub const fn vertical(x: usize, y: usize) -> Self {
        Self::new(Orientation::Vertical, x, y)
    }

    /// The territories on either side of this edge that exist on a
    /// `size × size` grid (zero, one or two of them).
    pub fn adjacent_cells(self, size: usize) -> Vec<Coord> {
        let candidates = match self.orientation {
            Orientation::Horizontal => [
                self.y.checked_sub(1).map(|y| Coord::new(self.x, y)),
                Some(Coord::new(self.x, self.y)),
            ],
            Orientation::Vertical => [
                self.x.checked_sub(1).map(|x| Coord::new(x, self.y)),
                Some(Coord::new(self.x, self.y)),
            ],
        };
        candidates
            .into_iter()
            .flatten()
            .filter(|c| c.x < size && c.y < size)
            .collect()
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.orientation {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        };
        write!(f, "{}-{}-{}", tag, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_rejects_outside() {
        let origin = Coord::new(0, 0);
        assert_eq!(origin.offset(-1, 0, 4), None);
        assert_eq!(origin.offset(3, 3, 4), Some(Coord::new(3, 3)));
        assert_eq!(origin.offset(4, 0, 4), None);
    }

    #[test]
    fn test_corner_has_two_orthogonal_neighbors() {
        let corner = Coord::new(0, 0);
        let neighbors = corner.orthogonal_neighbors(5);
        assert_eq!(neighbors, vec![Coord::new(0, 1), Coord::new(1, 0)]);
        assert_eq!(corner.surrounding(5).len(), 3);
    }

    #[test]
    fn test_border_edge_touches_one_cell() {
        assert_eq!(EdgeId::horizontal(2, 0).adjacent_cells(4), vec![Coord::new(2, 0)]);
        assert_eq!(EdgeId::horizontal(2, 4).adjacent_cells(4), vec![Coord::new(2, 3)]);
        assert_eq!(EdgeId::vertical(4, 1).adjacent_cells(4), vec![Coord::new(3, 1)]);
    }

    #[test]
    fn test_inner_edge_touches_two_cells() {
        assert_eq!(
            EdgeId::vertical(2, 1).adjacent_cells(4),
            vec![Coord::new(1, 1), Coord::new(2, 1)]
        );
    }

    #[test]
    fn test_edge_label() {
        assert_eq!(EdgeId::horizontal(3, 1).to_string(), "h-3-1");
        assert_eq!(EdgeId::vertical(0, 2).to_string(), "v-0-2");
    }
}
