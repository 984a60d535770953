//! Hand landmark samples from an external detector.
//!
//! A detector reports one hand as 21 keypoints in normalized image space
//! (`x`, `y` in 0..1, `z` a relative depth). Indices follow the usual
//! wrist-then-finger-joints layout.

use crate::error::LandmarkError;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Number of keypoints in a full hand sample.
pub const LANDMARK_COUNT: usize = 21;

/// Fingertip indices, thumb to pinky.
pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// One tracked keypoint.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Distance to `other` in the image plane, ignoring depth.
    #[inline]
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A validated 21-point hand sample.
///
/// Holding one of these means every keypoint exists and is finite, so indexed
/// access by the constants above cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Validate a raw detector sample.
    ///
    /// Points past the 21st are ignored.
    pub fn from_points(points: &[Landmark]) -> Result<Self, LandmarkError> {
        if points.len() < LANDMARK_COUNT {
            return Err(LandmarkError::TooFewPoints {
                found: points.len(),
                expected: LANDMARK_COUNT,
            });
        }

        let mut hand = [Landmark::default(); LANDMARK_COUNT];
        for (index, (slot, point)) in hand.iter_mut().zip(points).enumerate() {
            if !point.is_finite() {
                return Err(LandmarkError::NonFinite { index });
            }
            *slot = *point;
        }
        Ok(Self { points: hand })
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.points.get(index)
    }

    #[inline]
    pub fn wrist(&self) -> &Landmark {
        &self.points[WRIST]
    }

    #[inline]
    pub fn thumb_tip(&self) -> &Landmark {
        &self.points[THUMB_TIP]
    }

    #[inline]
    pub fn index_tip(&self) -> &Landmark {
        &self.points[INDEX_TIP]
    }

    #[inline]
    pub fn middle_tip(&self) -> &Landmark {
        &self.points[MIDDLE_TIP]
    }

    /// The five fingertips, thumb to pinky.
    pub fn fingertips(&self) -> impl Iterator<Item = &Landmark> + '_ {
        FINGERTIPS.iter().map(move |&i| &self.points[i])
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }
}
