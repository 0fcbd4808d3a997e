//! Deterministic simulation module
//!
//! All epidemic logic lives here. This module must be pure and deterministic:
//! - Single injected RNG only
//! - Stable iteration order (by agent index)
//! - Strict phase order within a tick
//! - No rendering or platform dependencies

pub mod agent;
pub mod census;
pub mod grid;
pub mod infection;
pub mod state;
pub mod tick;

pub use agent::{Agent, HealthState};
pub use census::Census;
pub use grid::SpatialGrid;
pub use infection::{InfectionEngine, Transmission, propagate_exhaustive};
pub use state::World;
pub use tick::tick;
