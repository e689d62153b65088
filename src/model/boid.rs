//! Boid-style zebrafish agent.
//!
//! Each boid adjusts its heading once per tick from three local rules
//! computed over neighbors within its vision radius: cohesion (steer toward
//! the neighborhood centroid), separation (steer away from neighbors closer
//! than the comfort distance), and heading alignment (steer toward the
//! neighborhood's average heading). The blended velocity is renormalized to
//! unit length every step; only the direction carries over, never an
//! accumulated magnitude.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::model::config::BoidConfig;
use crate::model::space::{AgentState, ContinuousSpace, SpaceError};

/// Errors from a single boid step.
#[derive(Debug, Error)]
pub enum StepError {
    /// The blended velocity came out exactly zero, so its direction is
    /// undefined. Propagated rather than patched with an arbitrary heading.
    #[error("boid {id} steering collapsed to a zero vector")]
    DegenerateVelocity { id: Uuid },

    #[error(transparent)]
    Space(#[from] SpaceError),
}

/// A single zebrafish agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boid {
    pub id: Uuid,
    pub position: DVec2,
    /// Current heading; unit length after every successful step.
    pub velocity: DVec2,
    /// Distance moved per tick along the heading.
    pub speed: f64,
    /// Neighbor query radius.
    pub vision: f64,
    /// Minimum comfortable distance from other boids.
    pub separation: f64,
    pub cohere_factor: f64,
    pub separate_factor: f64,
    pub match_factor: f64,
}

impl Boid {
    pub fn new(id: Uuid, position: DVec2, velocity: DVec2, cfg: &BoidConfig) -> Self {
        Self {
            id,
            position,
            velocity,
            speed: cfg.speed,
            vision: cfg.vision,
            separation: cfg.separation,
            cohere_factor: cfg.cohere_factor,
            separate_factor: cfg.separate_factor,
            match_factor: cfg.match_factor,
        }
    }

    /// Mean heading from this boid toward each neighbor; zero when alone.
    #[must_use]
    pub fn cohere(&self, space: &ContinuousSpace, neighbors: &[AgentState]) -> DVec2 {
        if neighbors.is_empty() {
            return DVec2::ZERO;
        }
        let sum: DVec2 = neighbors
            .iter()
            .map(|n| space.get_heading(self.position, n.pos))
            .sum();
        sum / neighbors.len() as f64
    }

    /// Negated sum of headings toward neighbors strictly closer than
    /// `separation`. Summed, not averaged: every too-close neighbor adds
    /// full weight, so crowding compounds.
    #[must_use]
    pub fn separate(&self, space: &ContinuousSpace, neighbors: &[AgentState]) -> DVec2 {
        let mut away = DVec2::ZERO;
        for n in neighbors {
            if space.get_distance(self.position, n.pos) < self.separation {
                away -= space.get_heading(self.position, n.pos);
            }
        }
        away
    }

    /// Mean of the neighbors' headings; zero when alone.
    #[must_use]
    pub fn match_heading(&self, neighbors: &[AgentState]) -> DVec2 {
        if neighbors.is_empty() {
            return DVec2::ZERO;
        }
        let sum: DVec2 = neighbors.iter().map(|n| n.velocity).sum();
        sum / neighbors.len() as f64
    }

    /// Advances the boid by one tick: query neighbors, blend the three rule
    /// vectors into the velocity, renormalize, and commit the move through
    /// the space.
    pub fn step(&mut self, space: &mut ContinuousSpace) -> Result<(), StepError> {
        let neighbors = space.get_neighbors(self.position, self.vision, false);
        let velocity = self.velocity
            + (self.cohere(space, &neighbors) * self.cohere_factor
                + self.separate(space, &neighbors) * self.separate_factor
                + self.match_heading(&neighbors) * self.match_factor)
                / 2.0;

        let norm = velocity.length();
        if norm == 0.0 {
            return Err(StepError::DegenerateVelocity { id: self.id });
        }
        self.velocity = velocity / norm;

        let new_pos = self.position + self.velocity * self.speed;
        self.position = space.move_agent(self.id, self.velocity, new_pos)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn spawn(space: &mut ContinuousSpace, cfg: &BoidConfig, pos: DVec2, vel: DVec2) -> Boid {
        let boid = Boid::new(Uuid::new_v4(), pos, vel, cfg);
        space
            .place_agent(boid.id, boid.velocity, boid.position)
            .unwrap();
        boid
    }

    #[test]
    fn test_rules_zero_without_neighbors() {
        let space = ContinuousSpace::new(100.0, 100.0, true);
        let boid = Boid::new(
            Uuid::new_v4(),
            DVec2::new(50.0, 50.0),
            DVec2::X,
            &BoidConfig::default(),
        );

        assert_eq!(boid.cohere(&space, &[]), DVec2::ZERO);
        assert_eq!(boid.separate(&space, &[]), DVec2::ZERO);
        assert_eq!(boid.match_heading(&[]), DVec2::ZERO);
    }

    #[test]
    fn test_lone_boid_keeps_heading_and_advances_by_speed() {
        let cfg = BoidConfig {
            speed: 3.0,
            ..BoidConfig::default()
        };
        let mut space = ContinuousSpace::new(100.0, 100.0, true);
        let mut boid = spawn(&mut space, &cfg, DVec2::new(50.0, 50.0), DVec2::Y);

        boid.step(&mut space).unwrap();
        assert!((boid.velocity - DVec2::Y).length() < EPS);
        assert!((boid.position - DVec2::new(50.0, 53.0)).length() < EPS);
    }

    #[test]
    fn test_cohere_only_scenario() {
        // Two boids at (0,0) and (1,0); pure cohesion pulls the first one
        // straight onto its neighbor in a single step.
        let cfg = BoidConfig {
            speed: 1.0,
            vision: 10.0,
            separation: 0.5,
            cohere_factor: 1.0,
            separate_factor: 0.0,
            match_factor: 0.0,
        };
        let mut space = ContinuousSpace::new(100.0, 100.0, false);
        let mut me = spawn(&mut space, &cfg, DVec2::new(0.0, 0.0), DVec2::X);
        let _other = spawn(&mut space, &cfg, DVec2::new(1.0, 0.0), DVec2::X);

        let neighbors = space.get_neighbors(me.position, me.vision, false);
        assert_eq!(neighbors.len(), 1);
        assert!((me.cohere(&space, &neighbors) - DVec2::X).length() < EPS);
        assert_eq!(me.separate(&space, &neighbors), DVec2::ZERO);

        me.step(&mut space).unwrap();
        assert!((me.velocity - DVec2::X).length() < EPS);
        assert!((me.position - DVec2::new(1.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_separation_sums_per_crowding_neighbor() {
        let cfg = BoidConfig {
            separation: 2.0,
            ..BoidConfig::default()
        };
        let space = ContinuousSpace::new(100.0, 100.0, true);
        let me = Boid::new(Uuid::new_v4(), DVec2::new(50.0, 50.0), DVec2::X, &cfg);

        let crowder = |x: f64| AgentState {
            id: Uuid::new_v4(),
            pos: DVec2::new(x, 50.0),
            velocity: DVec2::X,
        };

        // Each additional too-close neighbor on the same side adds its full
        // push; the magnitude never shrinks as the crowd grows.
        let one = me.separate(&space, &[crowder(51.0)]);
        let two = me.separate(&space, &[crowder(51.0), crowder(50.5)]);
        let three = me.separate(&space, &[crowder(51.0), crowder(50.5), crowder(51.5)]);
        assert!(one.length() > 0.0);
        assert!(two.length() >= one.length());
        assert!(three.length() >= two.length());

        // Neighbors at or beyond the comfort distance contribute nothing.
        let at_limit = me.separate(&space, &[crowder(52.0)]);
        assert_eq!(at_limit, DVec2::ZERO);
    }

    #[test]
    fn test_velocity_unit_length_after_step() {
        let cfg = BoidConfig::default();
        let mut space = ContinuousSpace::new(100.0, 100.0, true);
        let mut boids: Vec<Boid> = (0..8)
            .map(|i| {
                spawn(
                    &mut space,
                    &cfg,
                    DVec2::new(40.0 + i as f64, 50.0),
                    DVec2::new(0.6, 0.8),
                )
            })
            .collect();

        for boid in &mut boids {
            boid.step(&mut space).unwrap();
            assert!((boid.velocity.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_velocity_is_an_error() {
        // Heading straight at a lone neighbor with a cohere weight tuned so
        // the pull exactly cancels the current velocity.
        let cfg = BoidConfig {
            vision: 10.0,
            separation: 0.0,
            cohere_factor: 2.0,
            separate_factor: 0.0,
            match_factor: 0.0,
            ..BoidConfig::default()
        };
        let mut space = ContinuousSpace::new(100.0, 100.0, false);
        let mut me = spawn(&mut space, &cfg, DVec2::new(10.0, 10.0), DVec2::X);
        let _other = spawn(&mut space, &cfg, DVec2::new(9.0, 10.0), DVec2::X);

        // cohere = (-1, 0), factor 2, halved => (-1, 0); cancels velocity (1, 0).
        let err = me.step(&mut space).unwrap_err();
        assert!(matches!(err, StepError::DegenerateVelocity { .. }));
    }

    #[test]
    fn test_step_out_of_bounds_propagates() {
        let cfg = BoidConfig {
            speed: 5.0,
            ..BoidConfig::default()
        };
        let mut space = ContinuousSpace::new(100.0, 100.0, false);
        let mut boid = spawn(&mut space, &cfg, DVec2::new(98.0, 50.0), DVec2::X);

        let err = boid.step(&mut space).unwrap_err();
        assert!(matches!(err, StepError::Space(SpaceError::OutOfBounds { .. })));
    }
}
