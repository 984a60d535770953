//! Runner configuration: the simulation settings plus how long and how to drive it.

use crate::script::HandScript;
use morphcloud::{ConfigError, SimulationConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunnerConfig {
    pub simulation: SimulationConfig,
    /// Display frames to run.
    pub frames: u64,
    /// Seconds per frame. Real time when absent.
    pub fixed_delta: Option<f32>,
    /// Detector cadence: one landmark sample every N frames.
    pub detector_every: u64,
    /// Log a report every N frames.
    pub report_every: u64,
    pub script: HandScript,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            frames: 720,
            fixed_delta: Some(1.0 / 60.0),
            detector_every: 2,
            report_every: 60,
            script: HandScript::default(),
        }
    }
}

impl RunnerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;
        if let Some(delta) = self.fixed_delta {
            if !delta.is_finite() || delta <= 0.0 {
                return Err(ConfigError::OutOfRange {
                    field: "fixed_delta",
                    value: delta,
                    expected: "a finite value > 0",
                });
            }
        }
        for (field, value) in [("detector_every", self.detector_every), ("report_every", self.report_every)] {
            if value == 0 {
                return Err(ConfigError::OutOfRange { field, value: 0.0, expected: "at least 1" });
            }
        }
        for (field, value) in [
            ("script.orbit_period", self.script.orbit_period),
            ("script.grip_period", self.script.grip_period),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::OutOfRange { field, value, expected: "a finite value > 0" });
            }
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
