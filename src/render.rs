//! Presentation surface for a drawing frontend
//!
//! Everything here is read-only over the simulation: per-agent instance records
//! ready for upload, a health -> presentation mapping, and cell rectangles for a
//! debug grid overlay.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::sim::{Agent, HealthState, SpatialGrid};

/// Default draw radius of an agent
pub const AGENT_RADIUS: f32 = 2.0;

/// How a health state is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presentation {
    Healthy,
    Infected,
    Immune,
    Dead,
}

impl Presentation {
    pub fn color(self) -> [f32; 4] {
        match self {
            Presentation::Healthy => colors::HEALTHY,
            Presentation::Infected => colors::INFECTED,
            Presentation::Immune => colors::IMMUNE,
            Presentation::Dead => colors::DEAD,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Presentation::Healthy => "healthy",
            Presentation::Infected => "infected",
            Presentation::Immune => "immune",
            Presentation::Dead => "dead",
        }
    }
}

impl From<HealthState> for Presentation {
    fn from(health: HealthState) -> Self {
        match health {
            HealthState::Healthy => Presentation::Healthy,
            HealthState::Infected => Presentation::Infected,
            HealthState::Immune => Presentation::Immune,
            HealthState::Dead => Presentation::Dead,
        }
    }
}

/// One agent as drawn: position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct AgentInstance {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl AgentInstance {
    pub fn from_agent(agent: &Agent) -> Self {
        Self {
            position: agent.pos.as_vec2().to_array(),
            color: Presentation::from(agent.health).color(),
        }
    }
}

/// Instance records for every agent, in agent order
pub fn instances(agents: &[Agent]) -> Vec<AgentInstance> {
    agents.iter().map(AgentInstance::from_agent).collect()
}

/// Raw bytes of an instance slice for buffer upload
pub fn as_bytes(instances: &[AgentInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

/// Boundary of one grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Rectangles of every grid cell in row-major order
pub fn cell_rects(grid: &SpatialGrid) -> impl Iterator<Item = CellRect> + '_ {
    let size = grid.cell_size();
    (0..grid.len()).map(move |index| {
        let origin = grid.cell_origin(index);
        CellRect {
            x: origin.x,
            y: origin.y,
            width: size.x,
            height: size.y,
        }
    })
}

/// Colors for simulation elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [35.0 / 255.0, 35.0 / 255.0, 40.0 / 255.0, 1.0];
    pub const GRID_LINE: [f32; 4] = [70.0 / 255.0, 70.0 / 255.0, 90.0 / 255.0, 1.0];
    pub const HEALTHY: [f32; 4] = [1.0, 248.0 / 255.0, 240.0 / 255.0, 1.0];
    pub const INFECTED: [f32; 4] = [239.0 / 255.0, 71.0 / 255.0, 111.0 / 255.0, 1.0];
    pub const IMMUNE: [f32; 4] = [17.0 / 255.0, 138.0 / 255.0, 178.0 / 255.0, 1.0];
    /// Dead agents blend into the background
    pub const DEAD: [f32; 4] = BACKGROUND;
}
