//! Per-agent mutable state.
//!
//! An agent's position and purse mutate every turn; its identity, goal, and
//! strategy are fixed at setup. The `has_won` flag is monotonic: once an
//! agent reaches its goal it stays won for the rest of the game and skips
//! all further turns.

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::ids::AgentId;
use crate::offer::CoinBundle;
use crate::strategy::Strategy;

/// The full mutable state of one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    /// Stable unique identifier.
    pub agent_id: AgentId,
    /// Human-readable name for logs and reports.
    pub name: String,
    /// Current cell. Must stay within grid bounds and match the cell
    /// registry's record at all times.
    pub position: Coord,
    /// Goal cell. Immutable after setup.
    pub goal: Coord,
    /// Coins held, per color. Counts are never negative by construction.
    pub purse: CoinBundle,
    /// Which decision logic this agent runs.
    pub strategy: Strategy,
    /// Whether the agent has reached its goal. Monotonic false -> true.
    pub has_won: bool,
    /// Consecutive turns without a net position change.
    pub stagnant_turns: u32,
}

impl AgentState {
    /// Create an agent at `start` heading for `goal` with an empty purse.
    pub fn new(name: impl Into<String>, strategy: Strategy, start: Coord, goal: Coord) -> Self {
        Self {
            agent_id: AgentId::new(),
            name: name.into(),
            position: start,
            goal,
            purse: CoinBundle::new(),
            strategy,
            has_won: false,
            stagnant_turns: 0,
        }
    }
}
