//! Agent placement on the grid.
//!
//! The registry is the authoritative record of where agents stand. It keeps
//! two indexes in lockstep: cell -> occupants and agent -> position. All
//! validation happens before either index is touched, so a failed call
//! leaves the registry exactly as it was.

use std::collections::{BTreeMap, BTreeSet};

use trails_types::{AgentId, Coord};

use crate::error::WorldError;

/// Occupancy index over a bounded grid. Multiple agents may share a cell.
#[derive(Debug, Clone, Default)]
pub struct CellRegistry {
    /// Grid width in cells.
    width: u32,
    /// Grid height in cells.
    height: u32,
    /// Agents standing on each occupied cell.
    occupants: BTreeMap<Coord, BTreeSet<AgentId>>,
    /// Current cell of each placed agent.
    positions: BTreeMap<AgentId, Coord>,
}

impl CellRegistry {
    /// Create an empty registry over a `width` x `height` grid.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            occupants: BTreeMap::new(),
            positions: BTreeMap::new(),
        })
    }

    /// Whether `coord` lies within the registry bounds.
    const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    fn bounds_check(&self, coord: Coord) -> Result<(), WorldError> {
        if self.in_bounds(coord) {
            Ok(())
        } else {
            Err(WorldError::InvalidCoordinate {
                coord,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Place a new agent on a cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidCoordinate`] for out-of-bounds cells or
    /// [`WorldError::DuplicateAgent`] if the agent is already placed.
    pub fn place(&mut self, agent_id: AgentId, coord: Coord) -> Result<(), WorldError> {
        self.bounds_check(coord)?;
        if self.positions.contains_key(&agent_id) {
            return Err(WorldError::DuplicateAgent(agent_id));
        }
        self.occupants.entry(coord).or_default().insert(agent_id);
        self.positions.insert(agent_id, coord);
        tracing::debug!(%agent_id, cell = %coord, "agent placed");
        Ok(())
    }

    /// Move a placed agent to a new cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidCoordinate`] for out-of-bounds targets
    /// or [`WorldError::AgentNotPlaced`] if the agent was never placed. The
    /// registry is unchanged on error.
    pub fn move_agent(&mut self, agent_id: AgentId, to: Coord) -> Result<(), WorldError> {
        self.bounds_check(to)?;
        let from = self
            .positions
            .get(&agent_id)
            .copied()
            .ok_or(WorldError::AgentNotPlaced(agent_id))?;

        if let Some(cell) = self.occupants.get_mut(&from) {
            cell.remove(&agent_id);
            if cell.is_empty() {
                self.occupants.remove(&from);
            }
        }
        self.occupants.entry(to).or_default().insert(agent_id);
        self.positions.insert(agent_id, to);
        tracing::trace!(%agent_id, from = %from, to = %to, "agent moved");
        Ok(())
    }

    /// The recorded position of an agent.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::AgentNotPlaced`] if the agent was never placed.
    pub fn position_of(&self, agent_id: AgentId) -> Result<Coord, WorldError> {
        self.positions
            .get(&agent_id)
            .copied()
            .ok_or(WorldError::AgentNotPlaced(agent_id))
    }

    /// The agents currently standing on `coord`, in id order.
    #[must_use]
    pub fn agents_at(&self, coord: Coord) -> Vec<AgentId> {
        self.occupants
            .get(&coord)
            .map(|cell| cell.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of placed agents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no agents are placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
