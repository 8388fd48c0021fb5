//! Turn cycle: the phase loop that drives one Colored Trails turn.
//!
//! Each turn runs through these phases:
//!
//! 1. **Activation** -- shuffle the agent order for this turn.
//! 2. **Offer** -- each active agent composes trade offers from its own
//!    shortfall and a view of its peers' shortfalls; offers go to the pool.
//! 3. **Move** -- each active agent pays for and takes at most one step
//!    along its greedy route, or stays put if it cannot pay.
//! 4. **Settlement** -- the pool settles in submission order against live
//!    balances, then empties.
//! 5. **Stagnation** -- agents that did not change position this turn have
//!    their stagnation counter bumped; the board is flagged stuck as soon
//!    as any counter reaches the configured threshold.
//!
//! The turn cycle is deterministic given the same seed and initial state.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};
use trails_agents::{AgentError, MoveOutcome, movement, strategy};
use trails_types::{
    AgentId, AgentSnapshot, AgentState, Color, TurnSnapshot,
};
use trails_world::{CellRegistry, GridColoring, WorldError, path};

use crate::pool::{OfferPool, SettlementError, SettlementReport};

/// Errors that can occur during turn execution.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    /// An agent's move phase failed.
    #[error("agent error for {agent_id}: {source}")]
    Agent {
        /// The agent that caused the error.
        agent_id: AgentId,
        /// The underlying agent error.
        source: AgentError,
    },

    /// A world operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// Offer settlement failed.
    #[error("settlement error: {source}")]
    Settlement {
        /// The underlying settlement error.
        #[from]
        source: SettlementError,
    },

    /// The turn counter overflowed.
    #[error("turn counter overflow")]
    TurnOverflow,
}

/// Summary of a single turn's execution.
#[derive(Debug, Clone)]
pub struct TurnSummary {
    /// The turn number that was executed.
    pub turn: u64,
    /// Agent activation order used this turn.
    pub activation: Vec<AgentId>,
    /// Offers submitted to the pool this turn.
    pub offers_submitted: usize,
    /// The settlement outcome for this turn's pool.
    pub settlement: SettlementReport,
    /// What each active agent did in the move phase.
    pub moves: BTreeMap<AgentId, MoveOutcome>,
    /// Number of agents that have won, cumulative.
    pub agents_won: u32,
    /// Whether the board was flagged stuck at the end of this turn.
    pub stuck: bool,
}

/// The full mutable state of one game.
#[derive(Debug)]
pub struct GameState {
    /// The immutable board coloring.
    pub grid: GridColoring,
    /// Authoritative agent placement.
    pub registry: CellRegistry,
    /// All agents, keyed by id.
    pub agents: BTreeMap<AgentId, AgentState>,
    /// The current turn's offer pool.
    pub pool: OfferPool,
    /// Completed turns. Zero before the first turn runs.
    pub turn: u64,
    /// Whether the board has been flagged stuck.
    pub stuck: bool,
    /// Turns an agent may stay in place before counting toward a stuck
    /// board.
    pub stagnation_threshold: u32,
    /// Activation order of the most recent turn. Empty before turn 1.
    last_activation: Vec<AgentId>,
    /// The game's single RNG. Drives the board, activation shuffles, and
    /// goodwill acceptance rolls.
    rng: StdRng,
}

impl GameState {
    /// Assemble a game from already-built parts.
    ///
    /// [`crate::setup::build_game`] is the usual entry point; this
    /// constructor exists for tests and custom setups. The registry must
    /// already agree with each agent's recorded position.
    #[must_use]
    pub fn new(
        grid: GridColoring,
        registry: CellRegistry,
        agents: BTreeMap<AgentId, AgentState>,
        stagnation_threshold: u32,
        seed: u64,
    ) -> Self {
        Self {
            grid,
            registry,
            agents,
            pool: OfferPool::new(),
            turn: 0,
            stuck: false,
            stagnation_threshold,
            last_activation: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Execute one full turn.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError`] if a phase fails. Phase failures are engine
    /// faults (overflow, registry inconsistency); the ordinary outcomes
    /// of play -- blocked moves, unreachable goals, dropped offers -- are
    /// reported in the summary, not as errors.
    #[allow(clippy::too_many_lines)]
    pub fn run_turn(&mut self) -> Result<TurnSummary, TurnError> {
        let turn = self.turn.checked_add(1).ok_or(TurnError::TurnOverflow)?;

        // --- Activation ---
        let mut order: Vec<AgentId> = self.agents.keys().copied().collect();
        order.shuffle(&mut self.rng);
        self.last_activation.clone_from(&order);

        // --- Offer phase ---
        let shortfalls = self.compute_shortfalls()?;
        let mut offers_submitted = 0_usize;
        for agent_id in &order {
            let Some(agent) = self.agents.get(agent_id) else {
                continue;
            };
            if agent.has_won {
                continue;
            }
            let own = shortfalls.get(agent_id).cloned().unwrap_or_default();
            let peers: Vec<strategy::PeerNeeds> = order
                .iter()
                .filter(|peer| *peer != agent_id)
                .map(|peer| strategy::PeerNeeds {
                    agent_id: *peer,
                    shortfall: shortfalls.get(peer).cloned().unwrap_or_default(),
                })
                .collect();
            let offers = strategy::generate_offers(
                agent.strategy,
                agent.agent_id,
                &agent.purse,
                &own,
                &peers,
                turn,
            );
            for offer in offers {
                self.pool.submit(offer);
                offers_submitted = offers_submitted.saturating_add(1);
            }
        }

        // --- Move phase ---
        let mut moves = BTreeMap::new();
        for agent_id in &order {
            let Some(agent) = self.agents.get_mut(agent_id) else {
                continue;
            };
            let outcome = movement::move_phase(agent, &self.grid, &mut self.registry)
                .map_err(|source| TurnError::Agent {
                    agent_id: *agent_id,
                    source,
                })?;
            match outcome {
                MoveOutcome::Advanced { .. } | MoveOutcome::ReachedGoal { .. } => {
                    agent.stagnant_turns = 0;
                }
                MoveOutcome::Blocked { .. } | MoveOutcome::GoalUnreachable { .. } => {
                    agent.stagnant_turns = agent.stagnant_turns.saturating_add(1);
                }
                MoveOutcome::AlreadyWon => {}
            }
            moves.insert(*agent_id, outcome);
        }

        // --- Settlement ---
        let settlement = self
            .pool
            .settle(&mut self.agents, &self.grid, &mut self.rng)?;

        // --- Stagnation ---
        if self
            .agents
            .values()
            .any(|agent| agent.stagnant_turns >= self.stagnation_threshold)
        {
            self.stuck = true;
        }

        self.turn = turn;
        let agents_won = u32::try_from(
            self.agents.values().filter(|agent| agent.has_won).count(),
        )
        .unwrap_or(u32::MAX);

        let summary = TurnSummary {
            turn,
            activation: order,
            offers_submitted,
            settlement,
            moves,
            agents_won,
            stuck: self.stuck,
        };
        info!(
            turn = summary.turn,
            offers = summary.offers_submitted,
            trades = summary.settlement.executed.len(),
            agents_won = summary.agents_won,
            stuck = summary.stuck,
            "turn complete"
        );
        Ok(summary)
    }

    /// Each agent's route shortfall at the start of the turn.
    ///
    /// An agent whose route cannot be costed (its goal lies off the
    /// board) gets an empty shortfall and simply sits out the offer
    /// phase.
    fn compute_shortfalls(&self) -> Result<BTreeMap<AgentId, Vec<Color>>, TurnError> {
        let mut shortfalls = BTreeMap::new();
        for (agent_id, agent) in &self.agents {
            if agent.has_won {
                shortfalls.insert(*agent_id, Vec::new());
                continue;
            }
            let route = path::route(agent.position, agent.goal);
            let required = match path::coins_required(&self.grid, &route) {
                Ok(required) => required,
                Err(WorldError::InvalidCoordinate { .. }) => {
                    shortfalls.insert(*agent_id, Vec::new());
                    continue;
                }
                Err(other) => return Err(other.into()),
            };
            shortfalls.insert(*agent_id, strategy::shortfall(&agent.purse, &required));
        }
        Ok(shortfalls)
    }

    /// The winning agent, if any.
    ///
    /// When several agents have won, the first in the most recent
    /// activation order takes precedence; before the first turn, id order
    /// decides.
    #[must_use]
    pub fn get_winner(&self) -> Option<AgentId> {
        let won = |id: &AgentId| self.agents.get(id).is_some_and(|agent| agent.has_won);
        if self.last_activation.is_empty() {
            self.agents.keys().find(|id| won(id)).copied()
        } else {
            self.last_activation.iter().find(|id| won(id)).copied()
        }
    }

    /// A read-only snapshot of every agent at the current turn.
    #[must_use]
    pub fn snapshot(&self) -> TurnSnapshot {
        let agents = self
            .agents
            .iter()
            .map(|(agent_id, agent)| {
                (
                    *agent_id,
                    AgentSnapshot {
                        agent_id: *agent_id,
                        position: agent.position,
                        purse: agent.purse.clone(),
                        has_won: agent.has_won,
                    },
                )
            })
            .collect();
        TurnSnapshot {
            turn: self.turn,
            agents,
        }
    }
}

/// Log one agent's end-of-game state.
pub(crate) fn log_agent_standing(agent: &AgentState) {
    debug!(
        agent_id = %agent.agent_id,
        name = %agent.name,
        position = %agent.position,
        goal = %agent.goal,
        has_won = agent.has_won,
        coins = trails_agents::purse::total_coins(&agent.purse),
        "final standing"
    );
}
