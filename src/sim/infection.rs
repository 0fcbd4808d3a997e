//! Proximity-based transmission
//!
//! The grid pass visits each occupied cell that holds an Infected agent, gathers
//! the Healthy agents of its 3x3 neighbourhood once, and tests every infector of
//! that cell against them. Each infector is handled from its own cell only, so an
//! (infected, healthy) pair receives at most one attempt per pass.
//!
//! Infectors are the agents Infected when the pass starts. An agent infected
//! partway through a pass does not transmit until the next pass, so the outcome
//! does not depend on the order cells are visited.

use glam::DVec2;
use rand::Rng;

use super::agent::{Agent, HealthState};
use super::grid::SpatialGrid;

/// Transmission parameters for one pass
#[derive(Debug, Clone, Copy)]
pub struct Transmission {
    /// Separation must be strictly below this
    pub contact_distance: f64,
    /// Per-contact infection chance
    pub probability: f64,
    /// Recovery countdown given to newly infected agents
    pub recovery_ticks: u32,
}

/// Grid-accelerated infection pass with reusable scratch storage
#[derive(Debug, Clone, Default)]
pub struct InfectionEngine {
    /// Infectors of the cell being processed
    infectors: Vec<usize>,
    /// Healthy agents of the 3x3 neighbourhood
    candidates: Vec<usize>,
    /// Infected flags captured at pass start
    infectious: Vec<bool>,
}

impl InfectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one transmission pass over a grid built from `agents`.
    ///
    /// Returns the number of new infections.
    pub fn propagate<R: Rng>(
        &mut self,
        grid: &SpatialGrid,
        agents: &mut [Agent],
        params: Transmission,
        rng: &mut R,
    ) -> usize {
        // Agents infected during this pass do not transmit until the next one
        self.infectious.clear();
        self.infectious.extend(agents.iter().map(Agent::is_infected));

        let mut infections = 0;
        for cell in 0..grid.len() {
            self.infectors.clear();
            self.infectors.extend(
                grid.agents_in(cell)
                    .iter()
                    .copied()
                    .filter(|&idx| self.infectious[idx]),
            );
            if self.infectors.is_empty() {
                continue;
            }

            // Buckets partition the agents, so the union of distinct cells has no duplicates
            let (row, col) = grid.row_col(cell);
            self.candidates.clear();
            for neighbor in grid.neighbor_indices(row, col) {
                self.candidates.extend(
                    grid.agents_in(neighbor)
                        .iter()
                        .copied()
                        .filter(|&idx| agents[idx].is_healthy()),
                );
            }
            if self.candidates.is_empty() {
                continue;
            }

            for &i in &self.infectors {
                let source = agents[i].pos;
                for &h in &self.candidates {
                    if try_transmit(source, &mut agents[h], params, rng) {
                        log::trace!("agent {i} infected agent {h}");
                        infections += 1;
                    }
                }
            }
        }
        infections
    }
}

/// All-pairs transmission pass with the same per-pair semantics as the grid pass.
///
/// O(N^2); a reference for small populations and for checking the grid pass.
pub fn propagate_exhaustive<R: Rng>(
    agents: &mut [Agent],
    params: Transmission,
    rng: &mut R,
) -> usize {
    let infectors: Vec<usize> = agents
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_infected())
        .map(|(idx, _)| idx)
        .collect();

    let mut infections = 0;
    for i in infectors {
        let source = agents[i].pos;
        for target in agents.iter_mut() {
            if try_transmit(source, target, params, rng) {
                infections += 1;
            }
        }
    }
    infections
}

/// One transmission attempt from an infector at `source`.
///
/// Health is re-checked here so an agent infected earlier in the pass is never
/// re-infected and its countdown is never reset.
fn try_transmit<R: Rng>(
    source: DVec2,
    target: &mut Agent,
    params: Transmission,
    rng: &mut R,
) -> bool {
    if target.health != HealthState::Healthy {
        return false;
    }
    if source.distance(target.pos) >= params.contact_distance {
        return false;
    }
    if rng.random::<f64>() < params.probability {
        target.infect(params.recovery_ticks);
        true
    } else {
        false
    }
}
