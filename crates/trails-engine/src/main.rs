//! Game binary for the Colored Trails simulation.
//!
//! Wires together configuration, setup, and the game loop:
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from the path given as the first argument, or
//!    fall back to `trails-config.yaml`, or defaults if neither exists
//! 3. Build the board and roster
//! 4. Run the game loop until a winner, a stuck board, or the turn budget
//! 5. Log the result and each agent's final standing

use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;
use trails_core::config::GameConfig;
use trails_core::metrics::MemoryMetrics;
use trails_core::runner::{self, GameEndReason};
use trails_core::setup;

/// Default configuration path, used when no argument is given.
const DEFAULT_CONFIG_PATH: &str = "trails-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration loading, setup, or the game loop
/// fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.filter.clone())),
        )
        .with_target(true)
        .init();

    info!("trails-engine starting");
    info!(
        width = config.grid.width,
        height = config.grid.height,
        seed = config.rules.seed,
        max_turns = config.rules.max_turns,
        agents = config.agents.len(),
        "configuration loaded"
    );

    let mut state = setup::build_game(&config)?;
    let mut metrics = MemoryMetrics::new();
    let result = runner::run_game(&mut state, config.rules.max_turns, &mut metrics)?;

    match result.end_reason {
        GameEndReason::Winner(winner) => {
            let name = state
                .agents
                .get(&winner)
                .map_or("unknown", |agent| agent.name.as_str());
            info!(%winner, name, turns = result.total_turns, "game won");
        }
        GameEndReason::Stuck => {
            info!(turns = result.total_turns, "game stuck, no agent can move");
        }
        GameEndReason::TurnBudgetExhausted => {
            info!(turns = result.total_turns, "turn budget exhausted");
        }
    }

    for agent in state.agents.values() {
        info!(
            name = %agent.name,
            strategy = %agent.strategy,
            position = %agent.position,
            has_won = agent.has_won,
            "final standing"
        );
    }

    Ok(())
}

/// Load configuration from the CLI argument, the default path, or
/// built-in defaults.
fn load_config() -> Result<GameConfig, Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        return Ok(GameConfig::from_file(Path::new(&arg))?);
    }
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        return Ok(GameConfig::from_file(default_path)?);
    }
    Ok(GameConfig::default())
}
