//! Configuration for the flocking model.
//!
//! Strongly-typed structures mapping to `config.toml`. Defaults reproduce
//! the stock zebrafish run: a 100x100 toroidal tank with 200 fish.
//!
//! ```toml
//! [world]
//! width = 100.0
//! height = 100.0
//! torus = true
//! population = 200
//! seed = 42
//!
//! [boid]
//! speed = 5.0
//! vision = 10.0
//! separation = 2.0
//! cohere_factor = 0.25
//! separate_factor = 0.25
//! match_factor = 0.04
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// World-level parameters: space dimensions, topology, and population.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub torus: bool,
    pub population: usize,
    /// RNG seed for reproducible runs; drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            torus: true,
            population: 200,
            seed: None,
        }
    }
}

/// Per-boid behavior parameters shared by every fish in the school.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BoidConfig {
    pub speed: f64,
    pub vision: f64,
    pub separation: f64,
    pub cohere_factor: f64,
    pub separate_factor: f64,
    pub match_factor: f64,
}

impl Default for BoidConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            vision: 10.0,
            separation: 2.0,
            cohere_factor: 0.25,
            separate_factor: 0.25,
            match_factor: 0.04,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub boid: BoidConfig,
}

impl AppConfig {
    /// Loads configuration from `path`, writing out a default `config.toml`
    /// when the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if let Ok(content) = fs::read_to_string(path) {
            return toml::from_str(&content)
                .with_context(|| format!("invalid config file {}", path.display()));
        }
        let default = Self::default();
        let rendered = toml::to_string(&default).context("serialize default config")?;
        fs::write(path, rendered)
            .with_context(|| format!("write default config to {}", path.display()))?;
        Ok(default)
    }

    /// Rejects parameter combinations the model cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.world.width <= 0.0 || self.world.height <= 0.0 {
            bail!(
                "world dimensions must be positive, got {}x{}",
                self.world.width,
                self.world.height
            );
        }
        if self.world.population == 0 {
            bail!("population must be at least 1");
        }
        if self.boid.speed <= 0.0 {
            bail!("speed must be positive, got {}", self.boid.speed);
        }
        if self.boid.vision < 0.0 {
            bail!("vision must be non-negative, got {}", self.boid.vision);
        }
        if self.boid.separation < 0.0 {
            bail!("separation must be non-negative, got {}", self.boid.separation);
        }
        Ok(())
    }
}
