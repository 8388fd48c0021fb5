//! The bounded game loop.
//!
//! [`run_game`] wraps the single-turn [`GameState::run_turn`] and adds the
//! termination conditions around it: a winner, a stuck board, or an
//! exhausted turn budget. A winner is always checked before the stuck
//! flag, so an agent that reaches its goal on the turn the board would
//! stall still wins.

use tracing::info;
use trails_types::AgentId;

use crate::metrics::MetricsSink;
use crate::turn::{self, GameState, TurnError, TurnSummary};

/// Errors that can occur during a game run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A turn execution failed.
    #[error("turn error: {source}")]
    Turn {
        /// The underlying turn error.
        #[from]
        source: TurnError,
    },
}

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEndReason {
    /// An agent reached its goal.
    Winner(AgentId),
    /// Every active agent stalled for the stagnation threshold.
    Stuck,
    /// The turn budget ran out with no winner and no stall.
    TurnBudgetExhausted,
}

impl core::fmt::Display for GameEndReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Winner(agent_id) => write!(f, "winner: {agent_id}"),
            Self::Stuck => write!(f, "stuck"),
            Self::TurnBudgetExhausted => write!(f, "turn budget exhausted"),
        }
    }
}

/// Result of a game run.
#[derive(Debug)]
pub struct GameResult {
    /// Why the game ended.
    pub end_reason: GameEndReason,
    /// The last turn summary, if any turn completed.
    pub final_summary: Option<TurnSummary>,
    /// Total number of turns executed.
    pub total_turns: u64,
}

/// Run the game until a termination condition is met.
///
/// Executes up to `max_turns` turns, pushing one snapshot to `metrics`
/// after each.
///
/// # Errors
///
/// Returns [`RunnerError`] if a turn execution fails unrecoverably.
pub fn run_game(
    state: &mut GameState,
    max_turns: u64,
    metrics: &mut dyn MetricsSink,
) -> Result<GameResult, RunnerError> {
    let mut last_summary: Option<TurnSummary> = None;
    let mut total_turns: u64 = 0;

    info!(
        max_turns,
        agents = state.agents.len(),
        grid_width = state.grid.width(),
        grid_height = state.grid.height(),
        "game starting"
    );

    while total_turns < max_turns {
        let summary = state.run_turn()?;
        total_turns = total_turns.saturating_add(1);
        metrics.record_turn(&state.snapshot());

        // Winner before stuck: reaching the goal on a stalling turn
        // still counts as a win.
        if let Some(winner) = state.get_winner() {
            info!(turn = summary.turn, %winner, "game over");
            last_summary = Some(summary);
            return Ok(finish(state, GameEndReason::Winner(winner), last_summary, total_turns));
        }
        if state.stuck {
            info!(turn = summary.turn, "game over, board stuck");
            last_summary = Some(summary);
            return Ok(finish(state, GameEndReason::Stuck, last_summary, total_turns));
        }
        last_summary = Some(summary);
    }

    info!(total_turns, "game over, turn budget exhausted");
    Ok(finish(
        state,
        GameEndReason::TurnBudgetExhausted,
        last_summary,
        total_turns,
    ))
}

fn finish(
    state: &GameState,
    end_reason: GameEndReason,
    final_summary: Option<TurnSummary>,
    total_turns: u64,
) -> GameResult {
    for agent in state.agents.values() {
        turn::log_agent_standing(agent);
    }
    GameResult {
        end_reason,
        final_summary,
        total_turns,
    }
}
