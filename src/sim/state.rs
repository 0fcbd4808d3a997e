//! World state and lifecycle
//!
//! The world owns the authoritative agent collection, the immutable
//! configuration and the single random source every stochastic step draws from.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::agent::Agent;
use super::census::Census;
use super::grid::SpatialGrid;
use super::infection::InfectionEngine;
use super::tick;
use crate::config::{ConfigError, SimConfig};

/// A running simulation
#[derive(Debug, Clone)]
pub struct World<R: Rng = Pcg32> {
    pub(crate) config: SimConfig,
    /// Seed the RNG was created from (None when the RNG was injected)
    seed: Option<u64>,
    pub(crate) rng: R,
    pub(crate) agents: Vec<Agent>,
    pub(crate) grid: SpatialGrid,
    pub(crate) engine: InfectionEngine,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    /// New infections during the most recent tick
    pub(crate) last_infections: usize,
}

impl World<Pcg32> {
    /// Create a world seeded from `config.seed`, or from OS entropy when unset
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut world = Self::with_rng(config, Pcg32::seed_from_u64(seed))?;
        world.seed = Some(seed);
        log::info!("World initialized with seed: {seed}");
        Ok(world)
    }
}

impl<R: Rng> World<R> {
    /// Create a world drawing all randomness from `rng`
    pub fn with_rng(config: SimConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = Self::empty(config, rng);
        world.populate();
        Ok(world)
    }

    /// Create a world from explicitly placed agents (population is taken from `agents`)
    pub fn from_agents(mut config: SimConfig, agents: Vec<Agent>, rng: R) -> Result<Self, ConfigError> {
        config.population = agents.len();
        config.validate()?;
        let in_bounds = |a: &Agent| {
            (0.0..config.width).contains(&a.pos.x) && (0.0..config.height).contains(&a.pos.y)
        };
        if !agents.iter().all(in_bounds) {
            return Err(ConfigError::InvalidConfig("agent position outside the canvas"));
        }
        let mut world = Self::empty(config, rng);
        world.agents = agents;
        Ok(world)
    }

    fn empty(config: SimConfig, rng: R) -> Self {
        let grid = SpatialGrid::new(
            config.cell_width,
            config.cell_height,
            config.grid_rows(),
            config.grid_cols(),
        );
        Self {
            config,
            seed: None,
            rng,
            agents: Vec::new(),
            grid,
            engine: InfectionEngine::new(),
            time_ticks: 0,
            last_infections: 0,
        }
    }

    /// Fresh Healthy population at uniform random positions, agent 0 infected
    fn populate(&mut self) {
        let (width, height) = (self.config.width, self.config.height);
        let rng = &mut self.rng;
        self.agents = (0..self.config.population)
            .map(|_| {
                Agent::new(DVec2::new(
                    rng.random_range(0.0..width),
                    rng.random_range(0.0..height),
                ))
            })
            .collect();
        if let Some(seed_agent) = self.agents.first_mut() {
            seed_agent.infect(self.config.recovery_ticks);
        }
        self.time_ticks = 0;
        self.last_infections = 0;
    }

    /// Discard every agent and start over with the current configuration
    pub fn reset(&mut self) {
        self.populate();
        log::info!("World reset ({} agents)", self.agents.len());
    }

    /// Discard every agent and start over with a new configuration.
    ///
    /// On error the world is left untouched.
    pub fn reset_with(&mut self, config: SimConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.grid = SpatialGrid::new(
            config.cell_width,
            config.cell_height,
            config.grid_rows(),
            config.grid_cols(),
        );
        self.config = config;
        self.reset();
        Ok(())
    }

    /// Advance one tick and return the updated agents
    pub fn step(&mut self) -> &[Agent] {
        tick::tick(self);
        &self.agents
    }

    #[inline]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Seed of the internal RNG, if the world created it
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Completed ticks since the last reset
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.time_ticks
    }

    /// New infections in the most recent tick
    #[inline]
    pub fn last_infections(&self) -> usize {
        self.last_infections
    }

    pub fn census(&self) -> Census {
        Census::of(&self.agents)
    }

    /// Canvas extent as a vector
    #[inline]
    pub fn bounds(&self) -> DVec2 {
        DVec2::new(self.config.width, self.config.height)
    }

    /// Grid bucketed on the agents' current positions
    pub fn grid(&mut self) -> &SpatialGrid {
        self.grid.build(&self.agents);
        &self.grid
    }
}
