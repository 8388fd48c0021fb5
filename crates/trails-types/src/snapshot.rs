//! Read-only per-turn records for the metrics sink.
//!
//! The step engine pushes one [`TurnSnapshot`] per completed turn. Snapshots
//! are the only game history the core keeps; everything else is live state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::ids::AgentId;
use crate::offer::CoinBundle;

/// One agent's observable state at the end of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    /// The agent this snapshot describes.
    pub agent_id: AgentId,
    /// Cell the agent ended the turn on.
    pub position: Coord,
    /// Purse contents at end of turn.
    pub purse: CoinBundle,
    /// Whether the agent had won by the end of the turn.
    pub has_won: bool,
}

/// The per-agent state of the whole game at the end of one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    /// The turn this snapshot was taken at.
    pub turn: u64,
    /// Every agent's observable state, keyed by id.
    pub agents: BTreeMap<AgentId, AgentSnapshot>,
}
