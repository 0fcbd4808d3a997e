//! Population counts by health state

use std::fmt;

use serde::{Deserialize, Serialize};

use super::agent::{Agent, HealthState};

/// Number of agents in each health state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Census {
    pub healthy: usize,
    pub infected: usize,
    pub immune: usize,
    pub dead: usize,
}

impl Census {
    pub fn of(agents: &[Agent]) -> Self {
        let mut census = Self::default();
        for agent in agents {
            match agent.health {
                HealthState::Healthy => census.healthy += 1,
                HealthState::Infected => census.infected += 1,
                HealthState::Immune => census.immune += 1,
                HealthState::Dead => census.dead += 1,
            }
        }
        census
    }

    pub fn total(&self) -> usize {
        self.healthy + self.infected + self.immune + self.dead
    }

    /// Living agents
    pub fn alive(&self) -> usize {
        self.total() - self.dead
    }
}

impl fmt::Display for Census {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "healthy={} infected={} immune={} dead={}",
            self.healthy, self.infected, self.immune, self.dead
        )
    }
}
