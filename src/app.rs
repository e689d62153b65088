//! Headless application driver.
//!
//! Loads configuration, builds the school, and runs it for a fixed number of
//! ticks, reporting progress through `tracing`. Rendering is not part of
//! this crate; the JSON snapshot gives external presentation layers the
//! position, heading, and identity of every fish.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use crate::model::config::AppConfig;
use crate::model::world::School;

/// How often the run loop logs a progress line, in ticks.
const LOG_INTERVAL: u64 = 100;

pub struct App {
    pub school: School,
    pub config: AppConfig,
}

impl App {
    /// Loads config from `config_path` (writing defaults if absent) and
    /// builds the school, with an optional seed override from the CLI.
    pub fn new(config_path: &Path, seed_override: Option<u64>) -> Result<Self> {
        let mut config = AppConfig::load(config_path)?;
        if let Some(seed) = seed_override {
            config.world.seed = Some(seed);
        }
        let school = School::new(config.clone())?;
        tracing::info!(
            population = config.world.population,
            width = config.world.width,
            height = config.world.height,
            torus = config.world.torus,
            seed = ?config.world.seed,
            "school created"
        );
        Ok(Self { school, config })
    }

    /// Runs the simulation for `ticks` ticks.
    pub fn run(&mut self, ticks: u64) -> Result<()> {
        let start = Instant::now();
        for _ in 0..ticks {
            self.school
                .update()
                .with_context(|| format!("tick {} failed", self.school.tick + 1))?;

            if self.school.tick % LOG_INTERVAL == 0 {
                tracing::info!(
                    tick = self.school.tick,
                    polarization = self.school.polarization(),
                    "simulation progress"
                );
            }
        }
        tracing::info!(
            ticks,
            elapsed_ms = start.elapsed().as_millis() as u64,
            polarization = self.school.polarization(),
            "run finished"
        );
        Ok(())
    }

    /// Writes the current agent states (id, position, heading) as JSON.
    pub fn write_snapshot(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("create snapshot file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self.school.space.agents())
            .context("serialize snapshot")?;
        tracing::info!(path = %path.display(), "snapshot written");
        Ok(())
    }
}

/// Initialize the tracing subscriber for logging.
pub fn init_logging() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    )
    .ok();
}
