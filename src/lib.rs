//! # Zebrafish
//!
//! A boid-style flocking simulation of zebrafish in a continuous 2D space.
//! Each fish adjusts its heading once per tick from three local rules
//! computed over neighbors within its vision radius: cohesion, separation,
//! and heading alignment.
//!
//! The crate is split into:
//! - **Space** ([`model::space`]): the shared spatial index answering radius
//!   neighbor queries and distance/heading geometry, Euclidean or toroidal.
//! - **Boid** ([`model::boid`]): the agent and its steering rules.
//! - **School** ([`model::world`]): the model holding the space and the
//!   population, stepping every fish once per tick in a seeded random order.
//!
//! ## Example
//!
//! ```
//! use zebrafish_lib::model::config::AppConfig;
//! use zebrafish_lib::model::world::School;
//!
//! let mut config = AppConfig::default();
//! config.world.population = 50;
//! config.world.seed = Some(42);
//!
//! let mut school = School::new(config).unwrap();
//! for _ in 0..10 {
//!     school.update().unwrap();
//! }
//! assert!(school.polarization().is_finite());
//! ```

pub mod app;
pub mod model;

pub use model::boid::{Boid, StepError};
pub use model::config::AppConfig;
pub use model::space::{AgentState, ContinuousSpace, SpaceError};
pub use model::world::School;
