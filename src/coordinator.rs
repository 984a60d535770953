//! Orchestration between the detector feed, the simulator and the UI.
//!
//! The coordinator owns the simulator and reads the latest gesture snapshot
//! once per display frame. Reactions to gestures live here, not in the
//! extractor: when a pinch starts, the cloud switches to the heart shape and
//! takes on the heart colour.

use crate::color::{parse_hex_color, ColorMode, Palette};
use crate::config::SimulationConfig;
use crate::error::{ConfigError, ShapeError};
use crate::gesture::{GestureExtractor, GestureSignal};
use crate::mailbox::{GestureFeed, GestureMailbox};
use crate::shape::ShapeKind;
use crate::simulator::ParticleSimulator;
use crate::time::FrameClock;
use crate::Vec3;
use glam::Mat4;
use tracing::{debug, info};

/// Colour applied when a pinch switches the cloud to the heart.
pub const LOVE_COLOR: Vec3 = Vec3::new(1.0, 77.0 / 255.0, 109.0 / 255.0);

/// User-facing tracking status for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandStatus {
    NoHand,
    Detected,
    /// A pinch switched the cloud to the heart this frame.
    Love,
}

impl HandStatus {
    /// Status line shown to the user.
    pub fn text(&self) -> &'static str {
        match self {
            HandStatus::NoHand => "No hand detected",
            HandStatus::Detected => "Hand Detected",
            HandStatus::Love => "❤️ LOVE DETECTED ❤️",
        }
    }
}

/// Everything a renderer needs after one frame.
#[derive(Debug)]
pub struct FrameOutput<'a> {
    pub positions: &'a [Vec3],
    pub model: Mat4,
    pub color: Vec3,
    pub shape: ShapeKind,
    pub status: HandStatus,
    pub closed_strength: f32,
}

/// Owns the simulation lifecycle for one display.
#[derive(Debug)]
pub struct Coordinator {
    simulator: ParticleSimulator,
    /// Validated extractor template handed to every feed.
    extractor: GestureExtractor,
    mailbox: GestureMailbox,
    palette: Palette,
    clock: FrameClock,
    particle_size: f32,
    last_signal: GestureSignal,
}

impl Coordinator {
    /// Build from a config. Fails on any invalid setting.
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, FrameClock::new())
    }

    /// Build with a specific clock, e.g. a fixed-delta one for offline runs.
    pub fn with_clock(config: &SimulationConfig, clock: FrameClock) -> Result<Self, ConfigError> {
        let simulator = ParticleSimulator::new(config)?;
        let extractor = GestureExtractor::new(config.gesture.clone())?;
        let palette = Palette::new(parse_hex_color(&config.base_color)?);
        info!(shape = %simulator.shape(), particles = simulator.len(), "coordinator ready");
        Ok(Self {
            simulator,
            extractor,
            mailbox: GestureMailbox::new(),
            palette,
            clock,
            particle_size: config.particle_size,
            last_signal: GestureSignal::rest(),
        })
    }

    /// A detector-side feed publishing into this coordinator's mailbox.
    ///
    /// Uses the gesture settings this coordinator was built with. The feed
    /// may live on another thread; the frame loop only ever sees whole signals.
    pub fn feed(&self) -> GestureFeed {
        GestureFeed::with_extractor(self.extractor.clone(), self.mailbox.clone())
    }

    /// The mailbox every feed publishes into.
    pub fn mailbox(&self) -> &GestureMailbox {
        &self.mailbox
    }

    /// Switch to `kind`.
    pub fn set_shape(&mut self, kind: ShapeKind) {
        self.simulator.set_shape(kind);
    }

    /// Switch by identifier, e.g. from a UI button. Unknown names are rejected
    /// and the current shape stays.
    pub fn request_shape(&mut self, name: &str) -> Result<ShapeKind, ShapeError> {
        self.simulator.set_shape_named(name)
    }

    /// The active shape.
    pub fn shape(&self) -> ShapeKind {
        self.simulator.shape()
    }

    /// Pick a static colour.
    pub fn set_color(&mut self, color: Vec3) {
        self.palette.set_color(color);
    }

    /// Flip between the static colour and the rainbow cycle.
    pub fn toggle_rainbow(&mut self) -> ColorMode {
        self.palette.toggle_rainbow()
    }

    /// Current colour state.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Colour for the current frame time.
    pub fn color(&self) -> Vec3 {
        self.palette.color_at(self.clock.elapsed())
    }

    pub fn particle_size(&self) -> f32 {
        self.particle_size
    }

    pub fn simulator(&self) -> &ParticleSimulator {
        &self.simulator
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// The gesture snapshot used by the last frame.
    pub fn last_signal(&self) -> &GestureSignal {
        &self.last_signal
    }

    /// Run one display tick.
    pub fn frame(&mut self) -> FrameOutput<'_> {
        self.clock.tick();
        self.last_signal = self.mailbox.latest();

        let mut status = if self.last_signal.hand_present {
            HandStatus::Detected
        } else {
            HandStatus::NoHand
        };

        if self.mailbox.take_pinch_started() && self.simulator.shape() != ShapeKind::Love {
            debug!(frame = self.clock.frame(), "pinch switched shape to love");
            self.simulator.set_shape(ShapeKind::Love);
            self.palette.set_color(LOVE_COLOR);
            status = HandStatus::Love;
        }

        self.simulator.advance(&self.last_signal);

        FrameOutput {
            positions: self.simulator.positions(),
            model: self.simulator.model_matrix(),
            color: self.palette.color_at(self.clock.elapsed()),
            shape: self.simulator.shape(),
            status,
            closed_strength: self.last_signal.closed_strength,
        }
    }
}
