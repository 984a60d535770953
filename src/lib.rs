//! # morphcloud - gesture-driven morphing point clouds
//!
//! A large point cloud eases between parametric 3D shapes and reacts to a
//! tracked hand: the cloud follows the wrist, a closing fist contracts it, and
//! fingertips pull nearby particles toward them.
//!
//! morphcloud owns the numeric core only. Rendering, camera capture and the
//! hand-landmark detector are external; the crate consumes landmark samples
//! and produces a position buffer plus a model transform each frame.
//!
//! ## Quick Start
//!
//! ```ignore
//! use morphcloud::prelude::*;
//!
//! let config = SimulationConfig::default().with_particle_count(15_000);
//! let mut coordinator = Coordinator::new(&config)?;
//! let mut feed = coordinator.feed();
//!
//! // Detector callback, at the detector's own cadence:
//! feed.push(landmarks.as_deref());
//!
//! // Display refresh:
//! let frame = coordinator.frame();
//! renderer.draw(frame.positions, frame.model, frame.color);
//! ```
//!
//! ## Core Concepts
//!
//! ### Shapes
//!
//! [`ShapeKind`] names a point-distribution family (sphere, torus, galaxy, ...).
//! [`shape::generate`] samples one into a target buffer from an injected RNG.
//!
//! ### Gestures
//!
//! [`GestureExtractor`] folds each 21-point landmark sample into a smoothed
//! [`GestureSignal`]: hand position, fist closedness, fingertips and pinch.
//! Malformed samples count as "no hand".
//!
//! ### Simulation
//!
//! [`ParticleSimulator::advance`] runs one frame: contract targets by the
//! fist, add fingertip attraction, then ease every particle toward its target.
//!
//! | Module | Role |
//! |--------|------|
//! | [`shape`] | Target shape sampling |
//! | [`landmarks`] | Hand keypoint layout and validation |
//! | [`gesture`] | Landmark to gesture signal |
//! | [`mailbox`] | Latest-value hand-off from detector to frame loop |
//! | [`simulator`] | Per-frame particle integration |
//! | [`coordinator`] | Frame loop orchestration, pinch reaction, colour |

pub mod color;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod gesture;
pub mod landmarks;
pub mod mailbox;
pub mod shape;
pub mod simulator;
pub mod time;

pub use bytemuck;
pub use color::{ColorMode, Palette};
pub use config::{GestureConfig, SimulationConfig};
pub use coordinator::{Coordinator, FrameOutput, HandStatus};
pub use error::{ColorError, ConfigError, LandmarkError, ShapeError};
pub use gesture::{GestureExtractor, GestureSignal};
pub use glam::{Mat4, Vec2, Vec3};
pub use landmarks::{HandLandmarks, Landmark};
pub use mailbox::{GestureFeed, GestureMailbox};
pub use shape::ShapeKind;
pub use simulator::ParticleSimulator;
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use morphcloud::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{ColorMode, Palette};
    pub use crate::config::{GestureConfig, SimulationConfig};
    pub use crate::error::{ConfigError, LandmarkError, ShapeError};
    pub use crate::coordinator::{Coordinator, FrameOutput, HandStatus};
    pub use crate::gesture::{GestureExtractor, GestureSignal};
    pub use crate::landmarks::{HandLandmarks, Landmark};
    pub use crate::mailbox::{GestureFeed, GestureMailbox};
    pub use crate::shape::ShapeKind;
    pub use crate::simulator::ParticleSimulator;
    pub use crate::time::FrameClock;
    pub use crate::{Mat4, Vec2, Vec3};
}
