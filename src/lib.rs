//! Pandemic Sim - contagion spreading through a population of mobile agents
//!
//! Core modules:
//! - `sim`: Deterministic simulation (agents, spatial grid, infection pass, world state)
//! - `config`: Immutable world configuration and validation
//! - `render`: Read-only presentation surface for a drawing frontend

pub mod config;
pub mod render;
pub mod sim;

pub use config::{ConfigError, SimConfig};
pub use sim::{Agent, Census, HealthState, SpatialGrid, World};

/// Reference simulation constants (used by `SimConfig::default`)
pub mod consts {
    /// Canvas dimensions
    pub const CANVAS_WIDTH: f64 = 800.0;
    pub const CANVAS_HEIGHT: f64 = 800.0;

    /// Number of agents created on reset
    pub const POPULATION: usize = 5000;

    /// Grid cell dimensions (must be >= contact distance)
    pub const CELL_WIDTH: f64 = 20.0;
    pub const CELL_HEIGHT: f64 = 20.0;

    /// Transmission is possible strictly below this separation
    pub const CONTACT_DISTANCE: f64 = 7.0;

    /// Per-tick velocity perturbation bound
    pub const VELOCITY_JITTER: f64 = 0.001;

    /// Ticks spent Infected before recovering
    pub const RECOVERY_TICKS: u32 = 1000;
    /// Ticks spent Immune before becoming susceptible again
    pub const IMMUNITY_TICKS: u32 = 1000;

    /// Per-tick death chance while Infected
    pub const DEATH_PROBABILITY: f64 = 0.000_01;
    /// Per-contact transmission chance
    pub const TRANSMISSION_PROBABILITY: f64 = 0.1;

    /// Inset applied when an agent is pushed back from a wall
    pub const WALL_INSET: f64 = 1.0;

    /// Upper bound on grid buckets (2048 x 2048)
    pub const MAX_GRID_CELLS: usize = 1 << 22;
}
