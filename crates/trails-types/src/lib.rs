//! Shared type definitions for the Colored Trails simulation.
//!
//! This crate is the single source of truth for all types used across the
//! Trails workspace. It contains only data -- behavior lives in the world,
//! agents, and core crates downstream.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`color`] -- The fixed cell/coin color palette
//! - [`coord`] -- Grid cell coordinates with Manhattan geometry
//! - [`offer`] -- Trade offers and coin bundles
//! - [`strategy`] -- The closed set of agent strategy tags
//! - [`agent`] -- Per-agent mutable state
//! - [`snapshot`] -- Read-only per-turn records for the metrics sink

pub mod agent;
pub mod color;
pub mod coord;
pub mod ids;
pub mod offer;
pub mod snapshot;
pub mod strategy;

// Re-export all public types at crate root for convenience.
pub use agent::AgentState;
pub use color::Color;
pub use coord::Coord;
pub use ids::{AgentId, OfferId};
pub use offer::{CoinBundle, TradeOffer};
pub use snapshot::{AgentSnapshot, TurnSnapshot};
pub use strategy::Strategy;
