//! Continuous 2D space with optional toroidal wraparound.
//!
//! The space is the authoritative record of every agent's position. Agents
//! query it for neighbors and commit their moves through it; it knows nothing
//! about agent behavior beyond the position and last-committed velocity it
//! stores per agent.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Errors emitted by space placement and movement.
#[derive(Debug, Error)]
pub enum SpaceError {
    /// A non-toroidal space rejects positions outside its bounds.
    #[error("position ({x}, {y}) outside space bounds {width}x{height}")]
    OutOfBounds {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// Snapshot of a single agent as recorded in the space.
///
/// `velocity` is the heading the agent last committed via [`ContinuousSpace::place_agent`]
/// or [`ContinuousSpace::move_agent`], so agents stepping later in a tick
/// observe the already-updated state of agents that stepped earlier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgentState {
    pub id: Uuid,
    pub pos: DVec2,
    pub velocity: DVec2,
}

/// A bounded continuous 2D space, Euclidean or toroidal.
///
/// Bounds are `[0, width) x [0, height)`. In a toroidal space every
/// coordinate wraps into bounds; otherwise out-of-bounds positions are
/// rejected with [`SpaceError::OutOfBounds`].
pub struct ContinuousSpace {
    pub width: f64,
    pub height: f64,
    pub torus: bool,
    agents: Vec<AgentState>,
    index_of: HashMap<Uuid, usize>,
}

impl ContinuousSpace {
    pub fn new(width: f64, height: f64, torus: bool) -> Self {
        Self {
            width,
            height,
            torus,
            agents: Vec::new(),
            index_of: HashMap::new(),
        }
    }

    /// Number of agents currently placed in the space.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// All agent records, in placement order.
    #[must_use]
    pub fn agents(&self) -> &[AgentState] {
        &self.agents
    }

    /// Wraps a position into bounds, or rejects it when the space is not
    /// toroidal.
    fn adjust(&self, pos: DVec2) -> Result<DVec2, SpaceError> {
        if self.torus {
            Ok(DVec2::new(
                pos.x.rem_euclid(self.width),
                pos.y.rem_euclid(self.height),
            ))
        } else if pos.x < 0.0 || pos.x >= self.width || pos.y < 0.0 || pos.y >= self.height {
            Err(SpaceError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            })
        } else {
            Ok(pos)
        }
    }

    /// Records an agent at `pos` and writes the adjusted position back into
    /// its record fields.
    pub fn place_agent(
        &mut self,
        id: Uuid,
        velocity: DVec2,
        pos: DVec2,
    ) -> Result<DVec2, SpaceError> {
        let pos = self.adjust(pos)?;
        match self.index_of.get(&id) {
            Some(&idx) => {
                self.agents[idx].pos = pos;
                self.agents[idx].velocity = velocity;
            }
            None => {
                self.index_of.insert(id, self.agents.len());
                self.agents.push(AgentState { id, pos, velocity });
            }
        }
        Ok(pos)
    }

    /// Moves an agent to `pos`, wrapping into bounds when toroidal.
    ///
    /// The committed velocity is refreshed at the same time, so the record
    /// always reflects the agent's state as of its last completed step.
    pub fn move_agent(
        &mut self,
        id: Uuid,
        velocity: DVec2,
        pos: DVec2,
    ) -> Result<DVec2, SpaceError> {
        self.place_agent(id, velocity, pos)
    }

    /// All agents within `radius` of `pos`, unordered.
    ///
    /// A snapshot of the space at call time: agents that already moved this
    /// tick are seen at their new positions. When `include_self` is false,
    /// an agent at zero distance from `pos` (the querying agent) is skipped.
    #[must_use]
    pub fn get_neighbors(&self, pos: DVec2, radius: f64, include_self: bool) -> Vec<AgentState> {
        self.agents
            .iter()
            .filter(|a| {
                let d = self.get_distance(pos, a.pos);
                d <= radius && (include_self || d > 0.0)
            })
            .copied()
            .collect()
    }

    /// Euclidean distance between two positions; minimum-image distance when
    /// toroidal.
    #[must_use]
    pub fn get_distance(&self, a: DVec2, b: DVec2) -> f64 {
        self.get_heading(a, b).length()
    }

    /// Direction vector from `a` to `b` (`b - a`), taking the shortest path
    /// across the wrap when toroidal. Its length equals `get_distance(a, b)`.
    #[must_use]
    pub fn get_heading(&self, a: DVec2, b: DVec2) -> DVec2 {
        let mut delta = b - a;
        if self.torus {
            if delta.x.abs() > self.width / 2.0 {
                delta.x -= self.width.copysign(delta.x);
            }
            if delta.y.abs() > self.height / 2.0 {
                delta.y -= self.height.copysign(delta.y);
            }
        }
        delta
    }
}
