//! The fixed color palette shared by grid cells and coins.
//!
//! Every cell of the grid carries exactly one color, and every coin matches
//! exactly one color. The palette is a closed set: adding a color is a
//! breaking change to every purse and coloring in the simulation.

use serde::{Deserialize, Serialize};

/// A cell/coin color from the fixed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// Red cells and coins.
    Red,
    /// Blue cells and coins.
    Blue,
    /// Green cells and coins.
    Green,
    /// Yellow cells and coins.
    Yellow,
}

impl Color {
    /// The full palette, in canonical order.
    pub const ALL: [Self; 4] = [Self::Red, Self::Blue, Self::Green, Self::Yellow];
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
        };
        write!(f, "{name}")
    }
}
