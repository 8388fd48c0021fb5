//! Building a fresh [`GameState`] from configuration.
//!
//! Setup draws the board coloring, deals each agent its starting coins,
//! and places the roster. With no agents configured, the default roster
//! is three agents racing for the far corner: two self-interested and one
//! cooperative, spread across three edges of the board.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::info;
use trails_agents::AgentError;
use trails_types::{AgentState, Color, Coord, Strategy};
use trails_world::{CellRegistry, GridColoring, WorldError};

use crate::config::{AgentConfig, CoordConfig, GameConfig};
use crate::turn::GameState;

/// Errors that can occur while building a game.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// A grid or registry operation failed, including out-of-bounds
    /// starts and goals.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// Dealing starting coins failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },
}

/// Build a ready-to-run game from configuration.
///
/// # Errors
///
/// Returns [`SetupError`] if the board dimensions are invalid or any
/// roster position lies off the board.
pub fn build_game(config: &GameConfig) -> Result<GameState, SetupError> {
    let width = config.grid.width;
    let height = config.grid.height;
    let mut rng = StdRng::seed_from_u64(config.rules.seed);

    let grid = GridColoring::random(width, height, &Color::ALL, &mut rng)?;
    let mut registry = CellRegistry::new(width, height)?;

    let roster = if config.agents.is_empty() {
        default_roster(width, height)
    } else {
        config.agents.clone()
    };

    let far_corner = Coord::new(width.saturating_sub(1), height.saturating_sub(1));
    let mut agents = BTreeMap::new();
    for entry in &roster {
        let start = Coord::new(entry.start.x, entry.start.y);
        let goal = entry
            .goal
            .map_or(far_corner, |g| Coord::new(g.x, g.y));
        // Bounds-check both endpoints up front; the registry only checks
        // the start.
        grid.color_at(start)?;
        grid.color_at(goal)?;

        let mut agent = AgentState::new(entry.name.clone(), entry.strategy, start, goal);
        deal_starting_coins(&mut agent, config.rules.starting_coins, &mut rng)?;
        registry.place(agent.agent_id, start)?;
        info!(
            agent_id = %agent.agent_id,
            name = %agent.name,
            strategy = %agent.strategy,
            start = %start,
            goal = %goal,
            "agent placed"
        );
        agents.insert(agent.agent_id, agent);
    }

    Ok(GameState::new(
        grid,
        registry,
        agents,
        config.rules.stagnation_threshold,
        config.rules.seed,
    ))
}

/// The built-in three-agent roster, spread across three edges with a
/// shared goal in the far corner.
fn default_roster(width: u32, height: u32) -> Vec<AgentConfig> {
    let top = height.saturating_sub(1);
    let mid = width / 2;
    vec![
        AgentConfig {
            name: "pioneer".to_owned(),
            strategy: Strategy::SelfInterested,
            start: CoordConfig { x: 0, y: 0 },
            goal: None,
        },
        AgentConfig {
            name: "broker".to_owned(),
            strategy: Strategy::Cooperative,
            start: CoordConfig { x: 0, y: top },
            goal: None,
        },
        AgentConfig {
            name: "drifter".to_owned(),
            strategy: Strategy::SelfInterested,
            start: CoordConfig { x: mid, y: 0 },
            goal: None,
        },
    ]
}

/// Deal `count` coins of uniformly random colors into the agent's purse.
fn deal_starting_coins(
    agent: &mut AgentState,
    count: u32,
    rng: &mut StdRng,
) -> Result<(), AgentError> {
    for _ in 0..count {
        if let Some(color) = Color::ALL.choose(rng) {
            let held = agent.purse.entry(*color).or_insert(0);
            *held = held
                .checked_add(1)
                .ok_or(AgentError::ArithmeticOverflow {
                    context: "starting coin deal",
                })?;
        }
    }
    Ok(())
}
