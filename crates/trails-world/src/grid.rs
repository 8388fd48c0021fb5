//! The immutable grid coloring.
//!
//! Every cell of the W x H grid carries exactly one color from the fixed
//! palette. The coloring is generated once at game setup (from a seeded
//! RNG) and never mutates afterwards -- movement costs are read-only
//! queries against it for the rest of the game.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::IndexedRandom;
use trails_types::{Color, Coord};

use crate::error::WorldError;

/// An immutable color assignment over a W x H grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridColoring {
    /// Grid width in cells.
    width: u32,
    /// Grid height in cells.
    height: u32,
    /// Color per cell. Populated for every in-bounds coordinate.
    cells: BTreeMap<Coord, Color>,
}

impl GridColoring {
    /// Generate a coloring by drawing each cell's color uniformly from
    /// `palette` using the supplied RNG.
    ///
    /// The RNG is injected so that the same seed always produces the same
    /// board.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either dimension is
    /// zero, or [`WorldError::EmptyPalette`] if `palette` is empty.
    pub fn random<R: Rng + ?Sized>(
        width: u32,
        height: u32,
        palette: &[Color],
        rng: &mut R,
    ) -> Result<Self, WorldError> {
        if palette.is_empty() {
            return Err(WorldError::EmptyPalette);
        }
        Self::from_fn(width, height, |_| {
            palette.choose(rng).copied().unwrap_or(Color::Red)
        })
    }

    /// Build a coloring where every cell has the same color.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either dimension is zero.
    pub fn uniform(width: u32, height: u32, color: Color) -> Result<Self, WorldError> {
        Self::from_fn(width, height, |_| color)
    }

    /// Build a coloring from an arbitrary cell-to-color function.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either dimension is zero.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self, WorldError>
    where
        F: FnMut(Coord) -> Color,
    {
        if width == 0 || height == 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        let mut cells = BTreeMap::new();
        for x in 0..width {
            for y in 0..height {
                let coord = Coord::new(x, y);
                cells.insert(coord, f(coord));
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Grid width in cells.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether `coord` lies within the grid bounds.
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// The color of the cell at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidCoordinate`] for out-of-bounds lookups.
    pub fn color_at(&self, coord: Coord) -> Result<Color, WorldError> {
        self.cells
            .get(&coord)
            .copied()
            .ok_or(WorldError::InvalidCoordinate {
                coord,
                width: self.width,
                height: self.height,
            })
    }
}
