//! The school: model state and tick scheduler.
//!
//! Owns the space and every boid, spawns the initial population from a
//! seeded RNG, and advances the simulation one tick at a time. Activation
//! order is reshuffled each tick; because boids commit moves into the shared
//! space as they step, later boids in a tick see the already-updated state of
//! earlier ones. That ordering effect is a property of the model, so runs
//! are reproducible only for a fixed seed.

use anyhow::Result;
use glam::DVec2;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::model::boid::{Boid, StepError};
use crate::model::config::AppConfig;
use crate::model::space::ContinuousSpace;

pub struct School {
    pub config: AppConfig,
    pub space: ContinuousSpace,
    pub boids: Vec<Boid>,
    pub tick: u64,
    rng: ChaCha8Rng,
}

impl School {
    /// Builds the model: validates the config, seeds the RNG, and scatters
    /// the population over the space with random unit headings.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.world.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut space =
            ContinuousSpace::new(config.world.width, config.world.height, config.world.torus);

        let mut boids = Vec::with_capacity(config.world.population);
        for _ in 0..config.world.population {
            let pos = DVec2::new(
                rng.gen_range(0.0..config.world.width),
                rng.gen_range(0.0..config.world.height),
            );
            // A unit vector from a uniform angle keeps the nonzero-velocity
            // invariant unconditional.
            let angle = rng.gen_range(0.0..std::f64::consts::TAU);
            let velocity = DVec2::new(angle.cos(), angle.sin());

            let mut boid = Boid::new(Uuid::new_v4(), pos, velocity, &config.boid);
            boid.position = space.place_agent(boid.id, boid.velocity, boid.position)?;
            boids.push(boid);
        }

        Ok(Self {
            config,
            space,
            boids,
            tick: 0,
            rng,
        })
    }

    /// Advances the simulation by one tick: shuffle the visitation order,
    /// then step every boid sequentially against the shared space.
    ///
    /// A failed step aborts the tick and propagates; whether to stop the run
    /// or retry is the caller's call.
    pub fn update(&mut self) -> Result<(), StepError> {
        self.tick += 1;

        let mut order: Vec<usize> = (0..self.boids.len()).collect();
        order.shuffle(&mut self.rng);

        for idx in order {
            self.boids[idx].step(&mut self.space)?;
        }

        tracing::trace!(tick = self.tick, boids = self.boids.len(), "tick complete");
        Ok(())
    }

    /// Mean-heading order parameter in `[0, 1]`: 1 when the whole school
    /// swims in lockstep, near 0 for incoherent headings.
    #[must_use]
    pub fn polarization(&self) -> f64 {
        if self.boids.is_empty() {
            return 0.0;
        }
        let sum: DVec2 = self.boids.iter().map(|b| b.velocity).sum();
        sum.length() / self.boids.len() as f64
    }
}
