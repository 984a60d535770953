//! Error types for morphcloud.
//!
//! Each failure domain gets its own enum: configuration problems are fatal at
//! startup, unknown shape names are reported back to whoever asked for the
//! switch, and malformed landmark samples are normally swallowed by the
//! gesture extractor (the frame is treated as "no hand").

use std::fmt;

/// Errors raised while building or loading a [`SimulationConfig`](crate::SimulationConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// Particle count was zero.
    NonPositiveCount,
    /// A rate, size or threshold was non-finite or outside its allowed range.
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
    /// The gesture openness references are inverted or equal.
    OpennessReferences { closed: f32, open: f32 },
    /// A colour string could not be parsed.
    Color(ColorError),
    /// Failed to read or write the configuration file.
    Io(std::io::Error),
    /// The configuration file is not valid JSON for this schema.
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveCount => write!(f, "Particle count must be greater than zero"),
            ConfigError::OutOfRange { field, value, expected } => {
                write!(f, "Invalid value {} for `{}`: expected {}", value, field, expected)
            }
            ConfigError::OpennessReferences { closed, open } => write!(
                f,
                "Closed-fist reference ({}) must be smaller than open-palm reference ({})",
                closed, open
            ),
            ConfigError::Color(e) => write!(f, "Invalid colour: {}", e),
            ConfigError::Io(e) => write!(f, "Failed to access configuration file: {}", e),
            ConfigError::Json(e) => write!(f, "Failed to parse configuration: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Color(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ColorError> for ConfigError {
    fn from(e: ColorError) -> Self {
        ConfigError::Color(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Errors raised when a shape switch is requested by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The identifier does not name any shape archetype.
    Unknown(String),
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::Unknown(name) => write!(f, "Unknown shape `{}`", name),
        }
    }
}

impl std::error::Error for ShapeError {}

/// Reasons a landmark sample is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum LandmarkError {
    /// Fewer keypoints than a full hand skeleton.
    TooFewPoints { found: usize, expected: usize },
    /// A coordinate was NaN or infinite.
    NonFinite { index: usize },
}

impl fmt::Display for LandmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LandmarkError::TooFewPoints { found, expected } => {
                write!(f, "Landmark sample has {} points, expected {}", found, expected)
            }
            LandmarkError::NonFinite { index } => {
                write!(f, "Landmark {} has a non-finite coordinate", index)
            }
        }
    }
}

impl std::error::Error for LandmarkError {}

/// Errors raised when parsing a `#rrggbb` colour string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Not a `#` followed by six hex digits.
    Malformed(String),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::Malformed(s) => write!(f, "`{}` is not a #rrggbb colour", s),
        }
    }
}

impl std::error::Error for ColorError {}
