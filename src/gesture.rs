//! Gesture extraction from hand landmark samples.
//!
//! Each detector sample is folded into a [`GestureSignal`]: where the hand is,
//! how closed it is (smoothed across samples), where the fingertips are, and
//! whether thumb and index are pinching. Extraction is pure; the caller keeps
//! the previous signal and passes it back in.
//!
//! ```ignore
//! let extractor = GestureExtractor::default();
//! let mut signal = GestureSignal::rest();
//! // Per detector callback:
//! signal = extractor.extract(sample.as_deref(), &signal);
//! ```

use crate::config::GestureConfig;
use crate::error::ConfigError;
use crate::landmarks::{HandLandmarks, Landmark};
use crate::{Vec2, Vec3};
use tracing::warn;

/// Maximum number of fingertips a signal carries.
pub const MAX_FINGERTIPS: usize = 5;

/// Smoothed per-frame gesture state.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSignal {
    pub hand_present: bool,
    /// Mirrored hand position, each axis in [-1, 1].
    pub hand_position: Vec2,
    /// 0.0 = open palm, 1.0 = fist.
    pub closed_strength: f32,
    /// Mirrored fingertip positions, thumb to pinky. Empty without a hand.
    pub fingertips: Vec<Vec3>,
    pub pinch_active: bool,
}

impl GestureSignal {
    /// Open, centered, no hand.
    pub fn rest() -> Self {
        Self {
            hand_present: false,
            hand_position: Vec2::ZERO,
            closed_strength: 0.0,
            fingertips: Vec::new(),
            pinch_active: false,
        }
    }
}

impl Default for GestureSignal {
    fn default() -> Self {
        Self::rest()
    }
}

/// Map a normalized image point to mirrored [-1, 1] coordinates.
///
/// Both axes flip: the camera image is mirrored and image y grows downward.
#[inline]
pub fn mirror(landmark: &Landmark) -> Vec2 {
    Vec2::new(-(landmark.x - 0.5) * 2.0, -(landmark.y - 0.5) * 2.0)
}

/// Converts landmark samples into gesture signals.
#[derive(Debug, Clone, Default)]
pub struct GestureExtractor {
    config: GestureConfig,
}

impl GestureExtractor {
    /// Build from a config, rejecting settings that would break smoothing
    /// (e.g. equal openness references).
    pub fn new(config: GestureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated settings in use.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Fold one detector sample into the previous signal.
    ///
    /// `None` means the detector saw no hand. A sample that is too short or
    /// holds non-finite coordinates is treated the same way.
    pub fn extract(&self, landmarks: Option<&[Landmark]>, previous: &GestureSignal) -> GestureSignal {
        let hand = match landmarks.map(HandLandmarks::from_points) {
            Some(Ok(hand)) => hand,
            Some(Err(e)) => {
                warn!(error = %e, "rejected landmark sample");
                return self.release(previous);
            }
            None => return self.release(previous),
        };
        self.track(&hand, previous)
    }

    /// Same as [`extract`](Self::extract) for an already validated sample.
    pub fn track(&self, hand: &HandLandmarks, previous: &GestureSignal) -> GestureSignal {
        let wrist = hand.wrist();
        let fingertips = hand
            .fingertips()
            .map(|tip| mirror(tip).extend(tip.z))
            .collect();

        let closed_factor = 1.0 - self.openness(wrist.planar_distance(hand.middle_tip()));
        let closed_strength = previous.closed_strength
            + (closed_factor - previous.closed_strength) * self.config.close_rate;

        GestureSignal {
            hand_present: true,
            hand_position: mirror(wrist),
            closed_strength: closed_strength.clamp(0.0, 1.0),
            fingertips,
            pinch_active: self.is_pinching(hand),
        }
    }

    /// Openness in [0, 1] for a wrist to middle-tip distance.
    pub fn openness(&self, distance: f32) -> f32 {
        let span = self.config.open_reference - self.config.closed_reference;
        ((distance - self.config.closed_reference) / span).clamp(0.0, 1.0)
    }

    /// Thumb and index tips closer than the pinch threshold (exclusive).
    pub fn is_pinching(&self, hand: &HandLandmarks) -> bool {
        hand.thumb_tip().planar_distance(hand.index_tip()) < self.config.pinch_threshold
    }

    /// No usable hand: relax toward open and keep the last position.
    fn release(&self, previous: &GestureSignal) -> GestureSignal {
        let closed_strength =
            previous.closed_strength + (0.0 - previous.closed_strength) * self.config.release_rate;
        GestureSignal {
            hand_present: false,
            hand_position: previous.hand_position,
            closed_strength: closed_strength.clamp(0.0, 1.0),
            fingertips: Vec::new(),
            pinch_active: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{INDEX_TIP, LANDMARK_COUNT, MIDDLE_TIP, PINKY_TIP, THUMB_TIP, WRIST};

    /// A hand with every joint at the image center, then overrides.
    fn hand(overrides: &[(usize, Landmark)]) -> Vec<Landmark> {
        let mut points = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        // Keep thumb and index apart unless a test moves them.
        points[THUMB_TIP] = Landmark::new(0.3, 0.5, 0.0);
        points[INDEX_TIP] = Landmark::new(0.7, 0.5, 0.0);
        for (i, l) in overrides {
            points[*i] = *l;
        }
        points
    }

    #[test]
    fn test_degenerate_references_rejected() {
        for (closed, open) in [(0.25, 0.25), (0.35, 0.15)] {
            let config = GestureConfig {
                closed_reference: closed,
                open_reference: open,
                ..GestureConfig::default()
            };
            assert!(matches!(
                GestureExtractor::new(config),
                Err(ConfigError::OpennessReferences { .. })
            ));
        }
        assert!(GestureExtractor::new(GestureConfig::default()).is_ok());
    }

    #[test]
    fn test_rest_state() {
        let rest = GestureSignal::default();
        assert!(!rest.hand_present);
        assert_eq!(rest.closed_strength, 0.0);
        assert_eq!(rest.hand_position, Vec2::ZERO);
        assert!(rest.fingertips.is_empty());
    }

    #[test]
    fn test_position_is_mirrored() {
        let extractor = GestureExtractor::default();
        let points = hand(&[(WRIST, Landmark::new(0.25, 0.0, 0.0))]);
        let signal = extractor.extract(Some(points.as_slice()), &GestureSignal::rest());
        assert!(signal.hand_present);
        assert!((signal.hand_position - Vec2::new(0.5, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_fingertips_ordered_with_depth() {
        let extractor = GestureExtractor::default();
        let points = hand(&[
            (THUMB_TIP, Landmark::new(0.0, 0.0, -0.1)),
            (PINKY_TIP, Landmark::new(1.0, 1.0, 0.2)),
        ]);
        let signal = extractor.extract(Some(points.as_slice()), &GestureSignal::rest());
        assert_eq!(signal.fingertips.len(), MAX_FINGERTIPS);
        assert_eq!(signal.fingertips[0], Vec3::new(1.0, 1.0, -0.1));
        assert_eq!(signal.fingertips[4], Vec3::new(-1.0, -1.0, 0.2));
    }

    #[test]
    fn test_fist_reference_moves_toward_closed() {
        let extractor = GestureExtractor::default();
        let points = hand(&[
            (WRIST, Landmark::new(0.5, 0.5, 0.0)),
            (MIDDLE_TIP, Landmark::new(0.5, 0.35, 0.0)),
        ]);
        let signal = extractor.extract(Some(points.as_slice()), &GestureSignal::rest());
        // closedFactor ~ 1, one step at rate 0.2 from 0.
        assert!((signal.closed_strength - 0.2).abs() < 1e-4);

        let again = extractor.extract(Some(points.as_slice()), &signal);
        assert!(again.closed_strength > signal.closed_strength);
    }

    #[test]
    fn test_open_palm_relaxes() {
        let extractor = GestureExtractor::default();
        let points = hand(&[(MIDDLE_TIP, Landmark::new(0.5, 0.0, 0.0))]);
        let previous = GestureSignal { closed_strength: 1.0, ..GestureSignal::rest() };
        let signal = extractor.extract(Some(points.as_slice()), &previous);
        assert!((signal.closed_strength - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_openness_clamps() {
        let extractor = GestureExtractor::default();
        assert_eq!(extractor.openness(10.0), 1.0);
        assert_eq!(extractor.openness(0.0), 0.0);
        assert!((extractor.openness(0.25) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_closed_strength_bounded_for_any_distance() {
        let extractor = GestureExtractor::default();
        let mut signal = GestureSignal::rest();
        let distances: [f32; 7] = [10.0, 0.0, -3.0, 0.2, 100.0, 0.15, 0.36];
        for (step, d) in distances.iter().copied().cycle().take(200).enumerate() {
            let points = hand(&[(MIDDLE_TIP, Landmark::new(0.5, 0.5 - d, 0.0))]);
            let sample = if step % 7 == 3 { None } else { Some(points.as_slice()) };
            signal = extractor.extract(sample, &signal);
            assert!((0.0..=1.0).contains(&signal.closed_strength));
        }
    }

    #[test]
    fn test_pinch_threshold_is_exclusive() {
        let extractor = GestureExtractor::default();
        let near = hand(&[
            (THUMB_TIP, Landmark::new(0.40, 0.5, 0.0)),
            (INDEX_TIP, Landmark::new(0.44, 0.5, 0.0)),
        ]);
        let far = hand(&[
            (THUMB_TIP, Landmark::new(0.40, 0.5, 0.0)),
            (INDEX_TIP, Landmark::new(0.46, 0.5, 0.0)),
        ]);
        assert!(extractor.extract(Some(near.as_slice()), &GestureSignal::rest()).pinch_active);
        assert!(!extractor.extract(Some(far.as_slice()), &GestureSignal::rest()).pinch_active);
    }

    #[test]
    fn test_absent_hand_decays_and_keeps_position() {
        let extractor = GestureExtractor::default();
        let previous = GestureSignal {
            hand_present: true,
            hand_position: Vec2::new(0.3, -0.2),
            closed_strength: 1.0,
            fingertips: vec![Vec3::ONE; 5],
            pinch_active: true,
        };
        let signal = extractor.extract(None, &previous);
        assert!(!signal.hand_present);
        assert!(!signal.pinch_active);
        assert!(signal.fingertips.is_empty());
        assert_eq!(signal.hand_position, previous.hand_position);
        assert!((signal.closed_strength - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_sample_counts_as_absent() {
        let extractor = GestureExtractor::default();
        let previous = GestureSignal { closed_strength: 0.5, ..GestureSignal::rest() };

        let short = vec![Landmark::new(0.5, 0.5, 0.0); 9];
        let signal = extractor.extract(Some(short.as_slice()), &previous);
        assert!(!signal.hand_present);
        assert!((signal.closed_strength - 0.475).abs() < 1e-6);

        let nan = hand(&[(MIDDLE_TIP, Landmark::new(f32::NAN, 0.5, 0.0))]);
        let signal = extractor.extract(Some(nan.as_slice()), &previous);
        assert!(!signal.hand_present);
        assert!(signal.fingertips.is_empty());
    }
}
