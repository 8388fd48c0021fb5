//! Greedy Manhattan routing and per-route coin costing.
//!
//! Routing is deterministic: from any cell, the next step is picked by a
//! fixed axis preference (+x, then -x, then +y, then -y). Every step
//! strictly reduces the Manhattan distance to the goal, so a route over a
//! W x H grid always terminates in at most W + H steps.

use trails_types::{Color, CoinBundle, Coord};

use crate::error::WorldError;
use crate::grid::GridColoring;

/// The single greedy step from `from` toward `goal`, or `None` when the
/// two coincide.
///
/// Axis preference is fixed: +x first, then -x, then +y, then -y. Because
/// coordinates are unsigned and each branch moves strictly toward the
/// goal, the checked arithmetic here can only fail at the `u32` boundary.
fn step_toward(from: Coord, goal: Coord) -> Option<Coord> {
    if from.x < goal.x {
        return from.x.checked_add(1).map(|x| Coord::new(x, from.y));
    }
    if from.x > goal.x {
        return from.x.checked_sub(1).map(|x| Coord::new(x, from.y));
    }
    if from.y < goal.y {
        return from.y.checked_add(1).map(|y| Coord::new(from.x, y));
    }
    if from.y > goal.y {
        return from.y.checked_sub(1).map(|y| Coord::new(from.x, y));
    }
    None
}

/// The full greedy route from `start` to `goal`, inclusive of both ends.
///
/// When `start == goal` the route is just `[start]`. Each consecutive pair
/// of cells in the result is grid-adjacent.
#[must_use]
pub fn route(start: Coord, goal: Coord) -> Vec<Coord> {
    let mut cells = vec![start];
    let mut current = start;
    // Manhattan distance shrinks by one per step; this bound is a guard
    // against the unreachable u32-boundary case in step_toward.
    let mut remaining = start.manhattan_distance(goal);
    while let Some(next) = step_toward(current, goal) {
        if remaining == 0 {
            break;
        }
        cells.push(next);
        current = next;
        remaining = remaining.saturating_sub(1);
    }
    cells
}

/// Whether `route` ends on `goal`.
#[must_use]
pub fn reaches(route: &[Coord], goal: Coord) -> bool {
    route.last().copied() == Some(goal)
}

/// The coins needed to walk `route`: one coin of each visited cell's color,
/// excluding the starting cell (standing on a cell is free; entering one
/// costs a coin).
///
/// # Errors
///
/// Returns [`WorldError::InvalidCoordinate`] if any route cell lies outside
/// the grid, or [`WorldError::ArithmeticOverflow`] if a per-color count
/// exceeds `u32::MAX`.
pub fn coins_required(grid: &GridColoring, route: &[Coord]) -> Result<CoinBundle, WorldError> {
    let mut required = CoinBundle::new();
    for coord in route.iter().skip(1) {
        let color = grid.color_at(*coord)?;
        let count = required.entry(color).or_insert(0);
        *count = count
            .checked_add(1)
            .ok_or(WorldError::ArithmeticOverflow)?;
    }
    Ok(required)
}

/// The color an agent must pay to take its next greedy step from
/// `position` toward `goal`, or `None` when already there.
///
/// # Errors
///
/// Returns [`WorldError::InvalidCoordinate`] when the next step would leave
/// the grid, which indicates a goal outside the board.
pub fn next_step_color(
    grid: &GridColoring,
    position: Coord,
    goal: Coord,
) -> Result<Option<(Coord, Color)>, WorldError> {
    match step_toward(position, goal) {
        None => Ok(None),
        Some(next) => {
            let color = grid.color_at(next)?;
            Ok(Some((next, color)))
        }
    }
}
