//! Configuration types for morphcloud simulations.
//!
//! These types can be serialized to JSON and loaded at startup. Every field
//! has a default, so a config file only needs to name what it overrides.

use crate::color::parse_hex_color;
use crate::error::ConfigError;
use crate::shape::ShapeKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Gesture thresholds and smoothing rates.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureConfig {
    /// Wrist to middle-tip distance of a closed fist (normalized image units).
    pub closed_reference: f32,
    /// Wrist to middle-tip distance of an open palm.
    pub open_reference: f32,
    /// Per-sample smoothing rate toward the measured closedness.
    pub close_rate: f32,
    /// Per-sample decay rate toward open while no hand is seen.
    pub release_rate: f32,
    /// Thumb to index tip distance below which the hand is pinching.
    pub pinch_threshold: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            closed_reference: 0.15,
            open_reference: 0.35,
            close_rate: 0.2,
            release_rate: 0.05,
            pinch_threshold: 0.05,
        }
    }
}

impl GestureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rate("gesture.close_rate", self.close_rate)?;
        check_rate("gesture.release_rate", self.release_rate)?;
        check_positive("gesture.pinch_threshold", self.pinch_threshold)?;
        check_positive("gesture.open_reference", self.open_reference)?;
        if !self.closed_reference.is_finite() || self.closed_reference < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "gesture.closed_reference",
                value: self.closed_reference,
                expected: "a finite value >= 0",
            });
        }
        if self.closed_reference >= self.open_reference {
            return Err(ConfigError::OpennessReferences {
                closed: self.closed_reference,
                open: self.open_reference,
            });
        }
        Ok(())
    }
}

/// Complete simulation configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub particle_count: usize,
    /// Point size hint for the renderer.
    pub particle_size: f32,
    /// Initial static colour, `#rrggbb`.
    pub base_color: String,
    /// Fraction of the remaining distance a particle covers each frame.
    pub lerp_speed: f32,
    /// Hand reaction speed, exposed to external consumers only.
    pub reactivity: f32,
    pub initial_shape: ShapeKind,
    /// Fixed RNG seed for reproducible clouds. Entropy when absent.
    pub seed: Option<u64>,
    pub gesture: GestureConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: 15_000,
            particle_size: 0.15,
            base_color: "#00d2ff".into(),
            lerp_speed: 0.08,
            reactivity: 0.1,
            initial_shape: ShapeKind::Sphere,
            seed: None,
            gesture: GestureConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Set the smoothing rate.
    pub fn with_lerp_speed(mut self, lerp_speed: f32) -> Self {
        self.lerp_speed = lerp_speed;
        self
    }

    /// Seed the random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the shape shown at startup.
    pub fn with_initial_shape(mut self, kind: ShapeKind) -> Self {
        self.initial_shape = kind;
        self
    }

    /// Reject anything the simulator cannot run with. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NonPositiveCount);
        }
        check_rate("lerp_speed", self.lerp_speed)?;
        check_rate("reactivity", self.reactivity)?;
        check_positive("particle_size", self.particle_size)?;
        parse_hex_color(&self.base_color)?;
        self.gesture.validate()
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

fn check_rate(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, expected: "a rate in (0, 1]" })
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, expected: "a finite value > 0" })
    }
}
