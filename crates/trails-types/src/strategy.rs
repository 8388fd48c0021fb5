//! The closed set of agent strategy tags.
//!
//! Behavior (offer generation and evaluation) lives in `trails-agents`;
//! this crate only carries the tag so that configuration and snapshots can
//! name a strategy without pulling in the decision logic.

use serde::{Deserialize, Serialize};

/// Which decision logic an agent runs each turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Trades only toward its own route needs; accepts only offers that
    /// hand it a color it is short on.
    SelfInterested,
    /// Offers surplus coins toward other agents' needs and accepts
    /// generously, including a stochastic goodwill acceptance.
    Cooperative,
}

impl core::fmt::Display for Strategy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::SelfInterested => "self_interested",
            Self::Cooperative => "cooperative",
        };
        write!(f, "{name}")
    }
}
