/// Boid agent and its three steering rules
pub mod boid;
/// Simulation parameters loaded from `config.toml`
pub mod config;
/// Continuous 2D space with neighbor queries and optional wraparound
pub mod space;
/// The school: model state and tick scheduler
pub mod world;
