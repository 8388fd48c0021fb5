//! The Colored Trails step engine.
//!
//! This crate ties the board and the agents together into a playable game:
//! it collects trade offers into a per-turn pool, runs the turn cycle
//! (activation shuffle, offer phase, move phase, settlement), tracks
//! stagnation, and drives whole games to a winner, a stuck board, or an
//! exhausted turn budget.
//!
//! # Modules
//!
//! - [`config`] -- YAML game configuration with defaults.
//! - [`metrics`] -- [`MetricsSink`]: per-turn snapshot recording.
//! - [`pool`] -- The per-turn offer pool and its settlement pass.
//! - [`runner`] -- [`run_game`]: the bounded game loop.
//! - [`setup`] -- Building a fresh [`GameState`] from configuration.
//! - [`turn`] -- [`GameState`] and the single-turn cycle.

pub mod config;
pub mod metrics;
pub mod pool;
pub mod runner;
pub mod setup;
pub mod turn;

// Re-export primary types at crate root.
pub use config::{ConfigError, GameConfig};
pub use metrics::{MemoryMetrics, MetricsSink, NoOpMetrics};
pub use pool::{DropReason, OfferPool, SettlementReport};
pub use runner::{GameEndReason, GameResult, run_game};
pub use setup::build_game;
pub use turn::{GameState, TurnError, TurnSummary};
