//! The per-frame particle integrator.
//!
//! Holds the current position of every particle plus the target buffer of the
//! active shape. Each [`advance`](ParticleSimulator::advance) step builds an
//! effective target per particle (the shape target, contracted by a closing
//! fist and pulled toward nearby fingertips) and eases the particle toward it.
//!
//! The rigid group offset and the slow autonomous spin are presentation state:
//! they move the whole cloud through [`model_matrix`](ParticleSimulator::model_matrix)
//! and never touch per-particle positions.

use crate::config::SimulationConfig;
use crate::error::{ConfigError, ShapeError};
use crate::gesture::{GestureSignal, MAX_FINGERTIPS};
use crate::shape::{self, ShapeKind};
use crate::{Vec2, Vec3};
use glam::Mat4;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// World units per unit of normalized hand position, per axis.
pub const HAND_TO_WORLD: Vec2 = Vec2::new(12.0, 8.0);
/// Per-frame decay of the group offset while no hand is present.
pub const GROUP_RELEASE: f32 = 0.95;
/// Fraction of the shape a full fist collapses.
pub const MAX_CONTRACTION: f32 = 0.9;
/// Fingertips only pull particles closer than this.
pub const ATTRACTION_RADIUS: f32 = 3.0;
/// Pull per world unit of remaining distance inside the radius.
pub const ATTRACTION_GAIN: f32 = 0.15;
/// Spin per frame about the y and z axes, in radians.
pub const SPIN_PER_FRAME: Vec2 = Vec2::new(0.005, 0.002);

/// Map a mirrored fingertip to world space. Depth is flattened to 0.
#[inline]
pub fn fingertip_world(tip: Vec3) -> Vec3 {
    Vec3::new(tip.x * HAND_TO_WORLD.x, tip.y * HAND_TO_WORLD.y, 0.0)
}

/// Pull coefficient for a fingertip `distance` away. Zero at or beyond the radius.
#[inline]
pub fn attraction_strength(distance: f32) -> f32 {
    if distance < ATTRACTION_RADIUS {
        (ATTRACTION_RADIUS - distance) * ATTRACTION_GAIN
    } else {
        0.0
    }
}

/// Offset added to a particle's target by one fingertip.
#[inline]
pub fn attraction(position: Vec3, fingertip: Vec3) -> Vec3 {
    let delta = fingertip - position;
    delta * attraction_strength(delta.length())
}

/// Particle positions, shape targets and the cloud's presentation state.
#[derive(Debug)]
pub struct ParticleSimulator {
    positions: Vec<Vec3>,
    targets: Vec<Vec3>,
    shape: ShapeKind,
    lerp_speed: f32,
    reactivity: f32,
    /// Rigid translation of the whole cloud in the xy plane.
    group_offset: Vec2,
    /// Accumulated spin about (y, z).
    rotation: Vec2,
    frame: u64,
    rng: SmallRng,
}

impl ParticleSimulator {
    /// `count` particles with default settings.
    pub fn initialize(count: usize) -> Result<Self, ConfigError> {
        Self::new(&SimulationConfig::default().with_particle_count(count))
    }

    /// Build a simulator from a validated config.
    ///
    /// Particles start scattered in a 10-unit cube and the target buffer holds
    /// the configured initial shape.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Same as [`new`](Self::new) with an explicit random source.
    pub fn with_rng(config: &SimulationConfig, mut rng: SmallRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let count = config.particle_count;
        let positions = shape::scatter(count, &mut rng);
        let targets = shape::generate(config.initial_shape, count, &mut rng);

        info!(count, shape = %config.initial_shape, lerp_speed = config.lerp_speed, "simulator initialized");

        Ok(Self {
            positions,
            targets,
            shape: config.initial_shape,
            lerp_speed: config.lerp_speed,
            reactivity: config.reactivity,
            group_offset: Vec2::ZERO,
            rotation: Vec2::ZERO,
            frame: 0,
            rng,
        })
    }

    /// Regenerate the whole target buffer. Current positions are kept and
    /// ease toward the new shape from wherever they are.
    pub fn set_shape(&mut self, kind: ShapeKind) {
        let count = self.positions.len();
        shape::fill(kind, &mut self.targets, count, &mut self.rng);
        self.shape = kind;
        debug!(shape = %kind, count, "target buffer regenerated");
    }

    /// Switch shape by identifier. An unknown name leaves the targets untouched.
    pub fn set_shape_named(&mut self, name: &str) -> Result<ShapeKind, ShapeError> {
        let kind = name.parse()?;
        self.set_shape(kind);
        Ok(kind)
    }

    /// Run one frame against the resident gesture signal.
    pub fn advance(&mut self, gesture: &GestureSignal) {
        self.update_group_offset(gesture);

        let lerp = self.lerp_speed;
        if gesture.hand_present {
            let contraction = 1.0 - gesture.closed_strength * MAX_CONTRACTION;

            let mut tips = [Vec3::ZERO; MAX_FINGERTIPS];
            let mut tip_count = 0;
            for (slot, tip) in tips.iter_mut().zip(&gesture.fingertips) {
                *slot = fingertip_world(*tip);
                tip_count += 1;
            }
            let tips = &tips[..tip_count];

            for (current, target) in self.positions.iter_mut().zip(&self.targets) {
                let mut effective = *target * contraction;
                for tip in tips {
                    effective += attraction(*current, *tip);
                }
                *current += (effective - *current) * lerp;
            }
        } else {
            for (current, target) in self.positions.iter_mut().zip(&self.targets) {
                *current += (*target - *current) * lerp;
            }
        }

        self.rotation += SPIN_PER_FRAME;
        self.frame += 1;
    }

    fn update_group_offset(&mut self, gesture: &GestureSignal) {
        if gesture.hand_present {
            let goal = gesture.hand_position * HAND_TO_WORLD;
            self.group_offset += (goal - self.group_offset) * self.lerp_speed;
        } else {
            self.group_offset *= GROUP_RELEASE;
        }
    }

    // ========== Renderer-facing views ==========

    /// Current particle positions, in cloud-local space.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Positions as raw bytes (tightly packed `f32` xyz) for a vertex upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Local-to-world transform: group offset, then spin about y and z.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.group_offset.extend(0.0))
            * Mat4::from_rotation_y(self.rotation.x)
            * Mat4::from_rotation_z(self.rotation.y)
    }

    // ========== State queries ==========

    /// Shape targets, index-aligned with [`positions`](Self::positions).
    pub fn targets(&self) -> &[Vec3] {
        &self.targets
    }

    /// Particle count.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false for a constructed simulator.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The active shape.
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// Current rigid offset of the cloud in world units.
    pub fn group_offset(&self) -> Vec2 {
        self.group_offset
    }

    /// Accumulated spin about (y, z), in radians.
    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Per-frame easing fraction.
    pub fn lerp_speed(&self) -> f32 {
        self.lerp_speed
    }

    /// Hand reaction speed for external consumers. Unused by the integrator.
    pub fn reactivity(&self) -> f32 {
        self.reactivity
    }

    /// Mean particle position.
    pub fn centroid(&self) -> Vec3 {
        if self.positions.is_empty() {
            return Vec3::ZERO;
        }
        self.positions.iter().copied().sum::<Vec3>() / self.positions.len() as f32
    }

    /// Largest distance between a particle and its raw shape target.
    pub fn max_target_error(&self) -> f32 {
        self.positions
            .iter()
            .zip(&self.targets)
            .map(|(p, t)| p.distance(*t))
            .fold(0.0, f32::max)
    }
}
