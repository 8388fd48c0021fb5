//! Grid cell coordinates.
//!
//! The grid is a W x H rectangle of cells addressed by `(x, y)` with
//! `0 <= x < W` and `0 <= y < H`. All geometry in the simulation is
//! Manhattan: a legal single-step move changes exactly one axis by
//! exactly one unit.

use serde::{Deserialize, Serialize};

/// A cell coordinate on the grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Coord {
    /// Horizontal position, `0 <= x < width`.
    pub x: u32,
    /// Vertical position, `0 <= y < height`.
    pub y: u32,
}

impl Coord {
    /// Create a coordinate from its components.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate.
    pub const fn manhattan_distance(self, other: Self) -> u64 {
        self.x.abs_diff(other.x) as u64 + self.y.abs_diff(other.y) as u64
    }

    /// Whether `other` is exactly one legal single-step move away:
    /// the coordinates differ by one unit on exactly one axis.
    pub const fn is_adjacent(self, other: Self) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        (dx == 1 && dy == 0) || (dx == 0 && dy == 1)
    }
}

impl core::fmt::Display for Coord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Coord::new(1, 2);
        let b = Coord::new(4, 0);
        assert_eq!(a.manhattan_distance(b), 5);
        assert_eq!(b.manhattan_distance(a), 5);
    }

    #[test]
    fn manhattan_distance_to_self_is_zero() {
        let a = Coord::new(3, 3);
        assert_eq!(a.manhattan_distance(a), 0);
    }

    #[test]
    fn orthogonal_neighbors_are_adjacent() {
        let c = Coord::new(2, 2);
        assert!(c.is_adjacent(Coord::new(1, 2)));
        assert!(c.is_adjacent(Coord::new(3, 2)));
        assert!(c.is_adjacent(Coord::new(2, 1)));
        assert!(c.is_adjacent(Coord::new(2, 3)));
    }

    #[test]
    fn diagonal_and_self_are_not_adjacent() {
        let c = Coord::new(2, 2);
        assert!(!c.is_adjacent(Coord::new(3, 3)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Coord::new(2, 4)));
    }

    #[test]
    fn display_format() {
        assert_eq!(Coord::new(3, 4).to_string(), "(3, 4)");
    }
}
