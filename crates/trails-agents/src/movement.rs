//! The pay-to-move phase of an agent's turn.
//!
//! Movement is one step per turn at most: the agent takes the next cell on
//! its greedy route if it can pay that cell's color, and stays put
//! otherwise. Reaching the goal cell flips the monotonic `has_won` flag.

use trails_types::{AgentState, CoinBundle, Color, Coord};
use trails_world::{CellRegistry, GridColoring, WorldError, path};

use crate::error::AgentError;
use crate::purse;

/// What happened during an agent's move phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The agent had already won and did nothing.
    AlreadyWon,
    /// The agent stepped onto its goal cell this turn.
    ReachedGoal {
        /// The goal cell.
        at: Coord,
    },
    /// The agent paid for and took one step toward its goal.
    Advanced {
        /// The cell it now stands on.
        to: Coord,
    },
    /// The agent could not pay for its next step and stayed put.
    Blocked {
        /// The color it could not pay.
        needed: Color,
    },
    /// The greedy route toward the goal left the grid. The agent stays
    /// put and retries next turn.
    GoalUnreachable {
        /// The goal that cannot currently be reached.
        goal: Coord,
    },
}

/// Run the move phase for one agent.
///
/// The agent's recorded position and the registry are updated together;
/// on any error neither has changed.
///
/// # Errors
///
/// Returns [`AgentError`] only on engine faults: a purse failure after
/// the affordability check or a registry inconsistency. An unreachable
/// goal is a recoverable outcome, not an error.
pub fn move_phase(
    agent: &mut AgentState,
    grid: &GridColoring,
    registry: &mut CellRegistry,
) -> Result<MoveOutcome, AgentError> {
    if agent.has_won {
        return Ok(MoveOutcome::AlreadyWon);
    }

    let step = match path::next_step_color(grid, agent.position, agent.goal) {
        Ok(step) => step,
        Err(WorldError::InvalidCoordinate { .. }) => {
            tracing::warn!(
                agent_id = %agent.agent_id,
                at = %agent.position,
                goal = %agent.goal,
                "goal unreachable, staying put"
            );
            return Ok(MoveOutcome::GoalUnreachable { goal: agent.goal });
        }
        Err(other) => return Err(other.into()),
    };

    let Some((next, color)) = step else {
        // Already standing on the goal.
        agent.has_won = true;
        tracing::debug!(agent_id = %agent.agent_id, at = %agent.position, "goal reached");
        return Ok(MoveOutcome::ReachedGoal { at: agent.position });
    };

    if purse::count(&agent.purse, color) == 0 {
        tracing::trace!(
            agent_id = %agent.agent_id,
            at = %agent.position,
            needed = %color,
            "move blocked"
        );
        return Ok(MoveOutcome::Blocked { needed: color });
    }

    let mut toll = CoinBundle::new();
    toll.insert(color, 1);
    purse::debit(&mut agent.purse, &toll)?;
    registry.move_agent(agent.agent_id, next)?;
    agent.position = next;

    if agent.position == agent.goal {
        agent.has_won = true;
        tracing::debug!(agent_id = %agent.agent_id, at = %next, "goal reached");
        Ok(MoveOutcome::ReachedGoal { at: next })
    } else {
        tracing::trace!(agent_id = %agent.agent_id, to = %next, paid = %color, "advanced");
        Ok(MoveOutcome::Advanced { to: next })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use trails_types::Strategy;

    use super::*;

    fn make_agent(start: Coord, goal: Coord) -> AgentState {
        AgentState::new("mover", Strategy::SelfInterested, start, goal)
    }

    fn make_world(width: u32, height: u32, color: Color) -> (GridColoring, CellRegistry) {
        let grid = GridColoring::uniform(width, height, color).unwrap();
        let registry = CellRegistry::new(width, height).unwrap();
        (grid, registry)
    }

    #[test]
    fn funded_agent_takes_one_step() {
        let (grid, mut registry) = make_world(4, 1, Color::Red);
        let mut agent = make_agent(Coord::new(0, 0), Coord::new(3, 0));
        agent.purse.insert(Color::Red, 3);
        registry.place(agent.agent_id, agent.position).unwrap();

        let outcome = move_phase(&mut agent, &grid, &mut registry).unwrap();
        assert_eq!(outcome, MoveOutcome::Advanced { to: Coord::new(1, 0) });
        assert_eq!(agent.position, Coord::new(1, 0));
        assert_eq!(registry.position_of(agent.agent_id).unwrap(), Coord::new(1, 0));
        assert_eq!(agent.purse.get(&Color::Red), Some(&2));
        assert!(!agent.has_won);
    }

    #[test]
    fn unfunded_agent_stays_put() {
        let (grid, mut registry) = make_world(4, 1, Color::Blue);
        let mut agent = make_agent(Coord::new(0, 0), Coord::new(3, 0));
        agent.purse.insert(Color::Red, 5);
        registry.place(agent.agent_id, agent.position).unwrap();

        let outcome = move_phase(&mut agent, &grid, &mut registry).unwrap();
        assert_eq!(outcome, MoveOutcome::Blocked { needed: Color::Blue });
        assert_eq!(agent.position, Coord::new(0, 0));
        assert_eq!(agent.purse.get(&Color::Red), Some(&5));
    }

    #[test]
    fn stepping_onto_goal_wins() {
        let (grid, mut registry) = make_world(2, 1, Color::Green);
        let mut agent = make_agent(Coord::new(0, 0), Coord::new(1, 0));
        agent.purse.insert(Color::Green, 1);
        registry.place(agent.agent_id, agent.position).unwrap();

        let outcome = move_phase(&mut agent, &grid, &mut registry).unwrap();
        assert_eq!(outcome, MoveOutcome::ReachedGoal { at: Coord::new(1, 0) });
        assert!(agent.has_won);
        assert!(agent.purse.is_empty());
    }

    #[test]
    fn starting_on_goal_wins_without_paying() {
        let (grid, mut registry) = make_world(3, 3, Color::Red);
        let mut agent = make_agent(Coord::new(1, 1), Coord::new(1, 1));
        agent.purse.insert(Color::Red, 2);
        registry.place(agent.agent_id, agent.position).unwrap();

        let outcome = move_phase(&mut agent, &grid, &mut registry).unwrap();
        assert_eq!(outcome, MoveOutcome::ReachedGoal { at: Coord::new(1, 1) });
        assert!(agent.has_won);
        assert_eq!(agent.purse.get(&Color::Red), Some(&2));
    }

    #[test]
    fn won_agent_does_nothing() {
        let (grid, mut registry) = make_world(3, 1, Color::Red);
        let mut agent = make_agent(Coord::new(0, 0), Coord::new(2, 0));
        agent.has_won = true;
        agent.purse.insert(Color::Red, 2);
        registry.place(agent.agent_id, agent.position).unwrap();

        let outcome = move_phase(&mut agent, &grid, &mut registry).unwrap();
        assert_eq!(outcome, MoveOutcome::AlreadyWon);
        assert_eq!(agent.position, Coord::new(0, 0));
        assert_eq!(agent.purse.get(&Color::Red), Some(&2));
    }

    #[test]
    fn off_grid_goal_leaves_agent_in_place() {
        let (grid, mut registry) = make_world(2, 2, Color::Red);
        let mut agent = make_agent(Coord::new(1, 1), Coord::new(5, 1));
        agent.purse.insert(Color::Red, 10);
        registry.place(agent.agent_id, agent.position).unwrap();

        let outcome = move_phase(&mut agent, &grid, &mut registry).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::GoalUnreachable { goal: Coord::new(5, 1) }
        );
        assert_eq!(agent.position, Coord::new(1, 1));
        assert_eq!(agent.purse.get(&Color::Red), Some(&10));
        assert!(!agent.has_won);
    }
}
