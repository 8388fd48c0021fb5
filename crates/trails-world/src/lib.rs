//! Grid geography for the Colored Trails simulation.
//!
//! This crate models the physical board: an immutable color assignment over
//! a W x H grid, a deterministic greedy pathfinder, and a cell registry that
//! keeps agent placement consistent with recorded positions.
//!
//! # Modules
//!
//! - [`error`] -- Error types for grid and registry operations.
//! - [`grid`] -- [`GridColoring`]: the immutable cell-to-color assignment.
//! - [`path`] -- Greedy Manhattan routing and per-route coin costing.
//! - [`registry`] -- [`CellRegistry`]: bounded occupancy index per cell.

pub mod error;
pub mod grid;
pub mod path;
pub mod registry;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use grid::GridColoring;
pub use registry::CellRegistry;
