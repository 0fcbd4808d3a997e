//! World configuration
//!
//! Supplied once at world construction and never mutated afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value violates a configuration invariant.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// JSON input could not be decoded.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static configuration for a simulation world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Canvas width (agent x in `[0, width)`)
    pub width: f64,
    /// Canvas height (agent y in `[0, height)`)
    pub height: f64,
    /// Number of agents created on reset
    pub population: usize,
    /// Grid cell width
    pub cell_width: f64,
    /// Grid cell height
    pub cell_height: f64,
    /// Transmission requires separation strictly below this
    pub contact_distance: f64,
    /// Bound of the uniform per-tick velocity perturbation
    pub velocity_jitter: f64,
    /// Ticks spent Infected before turning Immune
    pub recovery_ticks: u32,
    /// Ticks spent Immune before turning Healthy
    pub immunity_ticks: u32,
    /// Per-tick chance that an Infected agent dies
    pub death_probability: f64,
    /// Per-contact chance that a Healthy agent is infected
    pub transmission_probability: f64,
    /// Optional RNG seed; a random one is drawn (and logged) when absent
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            population: POPULATION,
            cell_width: CELL_WIDTH,
            cell_height: CELL_HEIGHT,
            contact_distance: CONTACT_DISTANCE,
            velocity_jitter: VELOCITY_JITTER,
            recovery_ticks: RECOVERY_TICKS,
            immunity_ticks: IMMUNITY_TICKS,
            death_probability: DEATH_PROBABILITY,
            transmission_probability: TRANSMISSION_PROBABILITY,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Check every construction-time invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            self.width,
            self.height,
            self.cell_width,
            self.cell_height,
            self.contact_distance,
            self.velocity_jitter,
            self.death_probability,
            self.transmission_probability,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::InvalidConfig("values must be finite"));
        }
        if self.width <= 2.0 * WALL_INSET || self.height <= 2.0 * WALL_INSET {
            return Err(ConfigError::InvalidConfig(
                "canvas dimensions must exceed twice the wall inset",
            ));
        }
        if self.population == 0 {
            return Err(ConfigError::InvalidConfig("population must be positive"));
        }
        if self.cell_width <= 0.0 || self.cell_height <= 0.0 {
            return Err(ConfigError::InvalidConfig("cell dimensions must be positive"));
        }
        if self.cell_width > self.width || self.cell_height > self.height {
            return Err(ConfigError::InvalidConfig(
                "cell dimensions must not exceed the canvas",
            ));
        }
        if self.contact_distance <= 0.0 {
            return Err(ConfigError::InvalidConfig("contact_distance must be positive"));
        }
        if self.contact_distance > self.cell_width || self.contact_distance > self.cell_height {
            return Err(ConfigError::InvalidConfig(
                "contact_distance must not exceed the cell size",
            ));
        }
        if self.velocity_jitter < 0.0 {
            return Err(ConfigError::InvalidConfig("velocity_jitter must be non-negative"));
        }
        if self.recovery_ticks == 0 || self.immunity_ticks == 0 {
            return Err(ConfigError::InvalidConfig("timer durations must be at least one tick"));
        }
        if !(0.0..=1.0).contains(&self.death_probability) {
            return Err(ConfigError::InvalidConfig("death_probability must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.transmission_probability) {
            return Err(ConfigError::InvalidConfig(
                "transmission_probability must be within [0, 1]",
            ));
        }
        match self.grid_rows().checked_mul(self.grid_cols()) {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => return Err(ConfigError::InvalidConfig("cell size yields too many grid cells")),
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Grid rows covering the canvas height
    pub fn grid_rows(&self) -> usize {
        (self.height / self.cell_height).ceil() as usize
    }

    /// Grid columns covering the canvas width
    pub fn grid_cols(&self) -> usize {
        (self.width / self.cell_width).ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_rows(), 40);
        assert_eq!(config.grid_cols(), 40);
    }

    #[test]
    fn test_rejects_empty_population() {
        let config = SimConfig {
            population: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_contact_distance_beyond_cell() {
        let config = SimConfig {
            contact_distance: 25.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SimConfig {
            contact_distance: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_cells_and_probabilities() {
        let bad = [
            SimConfig {
                cell_width: 0.0,
                ..Default::default()
            },
            SimConfig {
                cell_height: -5.0,
                ..Default::default()
            },
            SimConfig {
                transmission_probability: 1.5,
                ..Default::default()
            },
            SimConfig {
                death_probability: -0.1,
                ..Default::default()
            },
            SimConfig {
                recovery_ticks: 0,
                ..Default::default()
            },
            SimConfig {
                width: f64::NAN,
                ..Default::default()
            },
        ];
        for config in &bad {
            assert!(config.validate().is_err(), "{config:?} should be rejected");
        }
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let config = SimConfig {
            cell_width: 1e-3,
            cell_height: 1e-3,
            contact_distance: 1e-3,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidConfig(_))));

        let config = SimConfig {
            cell_width: 1e-300,
            cell_height: 1e-300,
            contact_distance: 1e-300,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        // 2048 x 2048 cells is the largest accepted grid
        let config = SimConfig {
            width: 2048.0,
            height: 2048.0,
            cell_width: 1.0,
            cell_height: 1.0,
            contact_distance: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_uneven_canvas_rounds_grid_up() {
        let config = SimConfig {
            width: 105.0,
            height: 90.0,
            ..Default::default()
        };
        assert_eq!(config.grid_cols(), 6);
        assert_eq!(config.grid_rows(), 5);
    }

    #[test]
    fn test_json_partial_override() {
        let config = SimConfig::from_json(r#"{ "population": 42, "seed": 7 }"#).unwrap();
        assert_eq!(config.population, 42);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.width, CANVAS_WIDTH);

        let json = config.to_json_pretty().unwrap();
        assert_eq!(SimConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            SimConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{ "population": 0 }"#),
            Err(ConfigError::InvalidConfig(_))
        ));
    }
}
