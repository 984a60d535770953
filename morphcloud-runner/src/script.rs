//! Scripted synthetic hand standing in for a camera detector.
//!
//! Produces 21-point samples in normalized image space: the wrist orbits the
//! frame center, the fist opens and closes on a sine, thumb and index touch
//! during the pinch window, and nothing is reported during the dropout window.

use morphcloud::landmarks::{Landmark, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP, WRIST};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

/// A timed shape switch request, by identifier.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShapeChange {
    /// Seconds since start.
    pub at: f32,
    pub shape: String,
}

/// Timeline for the synthetic hand.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HandScript {
    /// Wrist orbit radius in image units.
    pub orbit_radius: f32,
    /// Seconds per wrist orbit.
    pub orbit_period: f32,
    /// Seconds per open-close-open cycle.
    pub grip_period: f32,
    /// `[start, end)` seconds during which thumb and index touch.
    pub pinch_window: Option<[f32; 2]>,
    /// `[start, end)` seconds during which no hand is reported.
    pub dropout_window: Option<[f32; 2]>,
    pub shape_changes: Vec<ShapeChange>,
}

impl Default for HandScript {
    fn default() -> Self {
        Self {
            orbit_radius: 0.15,
            orbit_period: 6.0,
            grip_period: 4.0,
            pinch_window: Some([3.0, 3.5]),
            dropout_window: Some([7.0, 8.5]),
            shape_changes: vec![
                ShapeChange { at: 1.0, shape: "torus".into() },
                ShapeChange { at: 5.0, shape: "galaxy".into() },
                ShapeChange { at: 9.0, shape: "dna".into() },
            ],
        }
    }
}

/// Wrist to middle-tip distance with the palm fully open.
const OPEN_REACH: f32 = 0.38;
/// Same, with a fist.
const CLOSED_REACH: f32 = 0.12;
/// Finger direction offsets from straight up (radians), thumb to pinky.
const FINGER_SPREAD: [f32; 5] = [-1.2, -0.3, 0.0, 0.3, 0.6];
/// Finger length relative to the middle finger.
const FINGER_LENGTH: [f32; 5] = [0.9, 1.0, 1.0, 0.9, 0.75];
/// Joint positions along a finger, base to tip.
const JOINT_FRACTIONS: [f32; 4] = [0.4, 0.6, 0.8, 1.0];

fn within(window: Option<[f32; 2]>, t: f32) -> bool {
    window.is_some_and(|[start, end]| t >= start && t < end)
}

/// Generates landmark samples from a [`HandScript`].
#[derive(Clone, Debug)]
pub struct SyntheticHand {
    script: HandScript,
}

impl SyntheticHand {
    pub fn new(script: HandScript) -> Self {
        Self { script }
    }

    /// Fist closure at `t`: 0 open, 1 closed.
    pub fn grip(&self, t: f32) -> f32 {
        0.5 - 0.5 * (t / self.script.grip_period * TAU).cos()
    }

    /// The detector output at `t` seconds. `None` during a dropout.
    pub fn sample(&self, t: f32) -> Option<Vec<Landmark>> {
        if within(self.script.dropout_window, t) {
            return None;
        }

        let orbit = t / self.script.orbit_period * TAU;
        let wrist = Landmark::new(
            0.5 + self.script.orbit_radius * orbit.cos(),
            0.6 + self.script.orbit_radius * orbit.sin(),
            0.0,
        );
        let reach = OPEN_REACH + (CLOSED_REACH - OPEN_REACH) * self.grip(t);

        let mut points = vec![wrist; LANDMARK_COUNT];
        points[WRIST] = wrist;
        for finger in 0..5 {
            // Image y grows downward, so "up" is -y.
            let angle = -FRAC_PI_2 + FINGER_SPREAD[finger];
            let length = reach * FINGER_LENGTH[finger];
            for (joint, fraction) in JOINT_FRACTIONS.iter().enumerate() {
                points[1 + finger * 4 + joint] = Landmark::new(
                    wrist.x + angle.cos() * length * fraction,
                    wrist.y + angle.sin() * length * fraction,
                    -0.01 * (finger as f32 + 1.0) * fraction,
                );
            }
        }

        if within(self.script.pinch_window, t) {
            let index_tip = points[INDEX_TIP];
            points[THUMB_TIP] = Landmark::new(index_tip.x + 0.01, index_tip.y, index_tip.z);
        }

        Some(points)
    }
}
