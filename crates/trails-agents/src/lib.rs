//! Agent behavior for the Colored Trails simulation.
//!
//! This crate owns everything an individual agent does: coin accounting in
//! its purse, strategy-driven offer generation and evaluation, and the
//! pay-to-move phase of its turn.
//!
//! # Modules
//!
//! - [`error`] -- Error types for purse and movement operations.
//! - [`purse`] -- Checked coin accounting over [`trails_types::CoinBundle`].
//! - [`strategy`] -- Offer generation and evaluation per [`trails_types::Strategy`].
//! - [`movement`] -- The single-step pay-to-move phase.

pub mod error;
pub mod movement;
pub mod purse;
pub mod strategy;

// Re-export primary types at crate root.
pub use error::AgentError;
pub use movement::MoveOutcome;
pub use strategy::PeerNeeds;
