//! Error types for the `trails-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use trails_types::{AgentId, Coord};

/// Errors that can occur during grid and registry operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A coordinate lies outside the grid bounds. Raised before any
    /// registry mutation takes place.
    #[error("coordinate {coord} outside {width}x{height} grid")]
    InvalidCoordinate {
        /// The offending coordinate.
        coord: Coord,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },

    /// A grid was requested with a zero-sized dimension.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A grid coloring was requested with no colors to draw from.
    #[error("empty color palette")]
    EmptyPalette,

    /// An agent was placed twice in the registry.
    #[error("agent {0} is already placed")]
    DuplicateAgent(AgentId),

    /// An agent was moved or queried before being placed.
    #[error("agent {0} is not placed on the grid")]
    AgentNotPlaced(AgentId),

    /// Arithmetic overflow during a checked calculation.
    #[error("arithmetic overflow in world calculation")]
    ArithmeticOverflow,
}
