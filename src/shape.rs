//! Procedural target shapes.
//!
//! Every [`ShapeKind`] maps to a sampling rule that fills a target buffer with
//! `count` points. Generation is a pure function of the kind, the count and an
//! injected random source: calling it twice gives statistically identical
//! clouds, and a seeded RNG gives identical ones.
//!
//! ```ignore
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let torus = generate(ShapeKind::Torus, 15_000, &mut rng);
//! assert_eq!(torus.len(), 15_000);
//! ```

use crate::error::ShapeError;
use crate::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

/// Sphere surface radius.
pub const SPHERE_RADIUS: f32 = 4.0;
/// Cube side length.
pub const CUBE_SIZE: f32 = 5.0;
/// Torus major (ring) radius.
pub const TORUS_MAJOR: f32 = 3.5;
/// Torus minor (tube) radius.
pub const TORUS_MINOR: f32 = 1.2;
/// Pyramid size constant.
pub const PYRAMID_SIZE: f32 = 6.0;

/// A named procedural point-distribution family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Sphere,
    Cube,
    Torus,
    Helix,
    #[serde(alias = "heart")]
    Love,
    Dna,
    Galaxy,
    Pyramid,
    Star,
}

impl ShapeKind {
    /// Every shape, in button order.
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Sphere,
        ShapeKind::Cube,
        ShapeKind::Torus,
        ShapeKind::Helix,
        ShapeKind::Love,
        ShapeKind::Dna,
        ShapeKind::Galaxy,
        ShapeKind::Pyramid,
        ShapeKind::Star,
    ];

    /// Lowercase identifier, as used by UI buttons and config files.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cube => "cube",
            ShapeKind::Torus => "torus",
            ShapeKind::Helix => "helix",
            ShapeKind::Love => "love",
            ShapeKind::Dna => "dna",
            ShapeKind::Galaxy => "galaxy",
            ShapeKind::Pyramid => "pyramid",
            ShapeKind::Star => "star",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name == "heart" {
            return Ok(ShapeKind::Love);
        }
        ShapeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| ShapeError::Unknown(s.to_string()))
    }
}

/// Per-point sampling state handed to each shape rule.
///
/// Index-driven shapes (helix, dna) need to know where a point sits in the
/// buffer; the rest only draw from the RNG.
struct ShapeContext<'a, R: Rng + ?Sized> {
    index: usize,
    count: usize,
    rng: &'a mut R,
}

impl<R: Rng + ?Sized> ShapeContext<'_, R> {
    /// Normalized position in the buffer (0.0 to just under 1.0).
    #[inline]
    fn progress(&self) -> f32 {
        self.index as f32 / self.count as f32
    }

    /// Uniform in [0, 1).
    #[inline]
    fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Uniform in [-half_width, half_width).
    #[inline]
    fn centered(&mut self, half_width: f32) -> f32 {
        (self.random() - 0.5) * 2.0 * half_width
    }

    /// Uniform angle in [0, 2π).
    #[inline]
    fn angle(&mut self) -> f32 {
        self.random() * TAU
    }

    fn sample(&mut self, kind: ShapeKind) -> Vec3 {
        match kind {
            ShapeKind::Sphere => self.sphere(),
            ShapeKind::Cube => self.cube(),
            ShapeKind::Torus => self.torus(),
            ShapeKind::Helix => self.helix(),
            ShapeKind::Love => self.love(),
            ShapeKind::Dna => self.dna(),
            ShapeKind::Galaxy => self.galaxy(),
            ShapeKind::Pyramid => self.pyramid(),
            ShapeKind::Star => self.star(),
        }
    }

    fn sphere(&mut self) -> Vec3 {
        let theta = self.angle();
        let phi = (self.random() * 2.0 - 1.0).acos();
        Vec3::new(
            SPHERE_RADIUS * phi.sin() * theta.cos(),
            SPHERE_RADIUS * phi.sin() * theta.sin(),
            SPHERE_RADIUS * phi.cos(),
        )
    }

    fn cube(&mut self) -> Vec3 {
        let half = CUBE_SIZE * 0.5;
        Vec3::new(self.centered(half), self.centered(half), self.centered(half))
    }

    fn torus(&mut self) -> Vec3 {
        let u = self.angle();
        let v = self.angle();
        let ring = TORUS_MAJOR + TORUS_MINOR * v.cos();
        Vec3::new(ring * u.cos(), ring * u.sin(), TORUS_MINOR * v.sin())
    }

    fn helix(&mut self) -> Vec3 {
        let t = self.progress() * 20.0;
        let x = (t * 3.0).cos() * 2.0 + self.centered(0.5);
        let y = (self.progress() - 0.5) * 10.0;
        let z = (t * 3.0).sin() * 2.0 + self.centered(0.5);
        Vec3::new(x, y, z)
    }

    fn love(&mut self) -> Vec3 {
        let t = self.angle();
        let x = 16.0 * t.sin().powi(3);
        let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
        let z = self.centered(2.5);
        Vec3::new(x * 0.25, y * 0.25, z)
    }

    fn dna(&mut self) -> Vec3 {
        // Two full turns; even indices on one strand, odd on the other.
        let t = self.progress() * TAU * 2.0;
        let side = if self.index % 2 == 0 { 1.0 } else { -1.0 };
        let radius = 2.0;
        let x = t.cos() * radius * side + self.centered(0.25);
        let y = (self.progress() - 0.5) * 12.0;
        let z = t.sin() * radius * side + self.centered(0.25);
        Vec3::new(x, y, z)
    }

    fn galaxy(&mut self) -> Vec3 {
        const ARMS: f32 = 3.0;
        let angle = self.angle();
        let radius = self.random() * 8.0;
        let arm_angle = (self.random() * ARMS).floor() / ARMS * TAU;
        let spiral = radius * 0.8;
        let theta = angle + spiral + arm_angle;
        Vec3::new(
            theta.cos() * radius,
            self.centered(0.1 * radius),
            theta.sin() * radius,
        )
    }

    fn pyramid(&mut self) -> Vec3 {
        let size = PYRAMID_SIZE;
        let r1 = self.random();
        let r2 = self.random();
        // 4 slanted faces + 1 base
        let face = self.rng.gen_range(0..5u32);

        if face == 0 {
            return Vec3::new((r1 - 0.5) * size, -size / 3.0, (r2 - 0.5) * size);
        }

        let offset = (1.0 - r1) * (size / 2.0);
        let lateral = (r2 - 0.5) * 2.0;
        let y = (1.0 - r1) * size - size / 2.0;
        match face {
            1 => Vec3::new(offset, y, lateral * offset),
            2 => Vec3::new(-offset, y, lateral * offset),
            3 => Vec3::new(lateral * offset, y, offset),
            _ => Vec3::new(lateral * offset, y, -offset),
        }
    }

    fn star(&mut self) -> Vec3 {
        const SPIKES: f32 = 5.0;
        let t = self.angle();
        let r = 3.0 + 2.0 * (SPIKES * t).cos();
        let fill = self.random() * r;
        Vec3::new(t.cos() * fill, t.sin() * fill, self.centered(1.0))
    }
}

/// Generate `count` target points for `kind`.
///
/// Every slot is filled; the output length is always exactly `count`.
pub fn generate<R: Rng + ?Sized>(kind: ShapeKind, count: usize, rng: &mut R) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(count);
    fill(kind, &mut points, count, rng);
    points
}

/// Overwrite `buffer` with `count` freshly sampled points for `kind`.
///
/// Reuses the buffer's allocation; used by the simulator on shape switches.
pub fn fill<R: Rng + ?Sized>(kind: ShapeKind, buffer: &mut Vec<Vec3>, count: usize, rng: &mut R) {
    buffer.clear();
    for index in 0..count {
        let mut ctx = ShapeContext { index, count, rng: &mut *rng };
        buffer.push(ctx.sample(kind));
    }
}

/// Random scatter used before any shape is applied: each axis uniform in [-5, 5).
pub fn scatter<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            Vec3::new(
                (rng.gen::<f32>() - 0.5) * 10.0,
                (rng.gen::<f32>() - 0.5) * 10.0,
                (rng.gen::<f32>() - 0.5) * 10.0,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn test_every_kind_fills_every_slot() {
        let mut rng = rng();
        for kind in ShapeKind::ALL {
            for count in [1, 2, 7, 1000] {
                let points = generate(kind, count, &mut rng);
                assert_eq!(points.len(), count, "{kind} with {count}");
                assert!(points.iter().all(|p| p.is_finite()), "{kind} produced non-finite point");
            }
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert!(generate(ShapeKind::Galaxy, 0, &mut rng()).is_empty());
    }

    #[test]
    fn test_sphere_on_surface() {
        for p in generate(ShapeKind::Sphere, 2000, &mut rng()) {
            assert!((p.length() - SPHERE_RADIUS).abs() < 1e-3);
        }
    }

    #[test]
    fn test_cube_bounds() {
        for p in generate(ShapeKind::Cube, 2000, &mut rng()) {
            assert!(p.abs().max_element() <= CUBE_SIZE * 0.5);
        }
    }

    #[test]
    fn test_torus_tube_distance() {
        for p in generate(ShapeKind::Torus, 2000, &mut rng()) {
            let ring = (p.x * p.x + p.y * p.y).sqrt() - TORUS_MAJOR;
            let tube = (ring * ring + p.z * p.z).sqrt();
            assert!((tube - TORUS_MINOR).abs() < 1e-3);
        }
    }

    #[test]
    fn test_helix_height_follows_index() {
        let points = generate(ShapeKind::Helix, 100, &mut rng());
        assert!((points[0].y - -5.0).abs() < 1e-5);
        assert!((points[50].y - 0.0).abs() < 1e-5);
        for (i, p) in points.iter().enumerate() {
            let t = i as f32 / 100.0 * 20.0;
            assert!((p.x - (t * 3.0).cos() * 2.0).abs() <= 0.5);
            assert!((p.z - (t * 3.0).sin() * 2.0).abs() <= 0.5);
        }
    }

    #[test]
    fn test_dna_strands_alternate() {
        let points = generate(ShapeKind::Dna, 1000, &mut rng());
        // Index 0 and 1 sit at nearly the same t, on opposite strands.
        assert!((points[0].x - 2.0).abs() <= 0.25);
        assert!((points[1].x - -2.0).abs() <= 0.26);
        for p in &points {
            assert!(p.y >= -6.0 && p.y < 6.0);
        }
    }

    #[test]
    fn test_love_extent() {
        for p in generate(ShapeKind::Love, 2000, &mut rng()) {
            assert!(p.x.abs() <= 16.0 * 0.25 + 1e-4);
            assert!(p.y <= 3.0 && p.y >= -17.0 * 0.25 - 1e-4);
            assert!(p.z.abs() <= 2.5);
        }
    }

    #[test]
    fn test_galaxy_is_flat_disk() {
        for p in generate(ShapeKind::Galaxy, 2000, &mut rng()) {
            let radius = (p.x * p.x + p.z * p.z).sqrt();
            assert!(radius < 8.0 + 1e-4);
            assert!(p.y.abs() <= 0.1 * radius + 1e-5);
        }
    }

    #[test]
    fn test_pyramid_base_and_faces() {
        let points = generate(ShapeKind::Pyramid, 5000, &mut rng());
        let base = points.iter().filter(|p| (p.y - -2.0).abs() < 1e-6).count();
        // Roughly one in five lands on the base.
        assert!(base > 700 && base < 1300, "base count {base}");
        for p in &points {
            assert!(p.x.abs() <= 3.0 + 1e-4 && p.z.abs() <= 3.0 + 1e-4);
            assert!(p.y >= -3.0 - 1e-4 && p.y <= 3.0 + 1e-4);
        }
    }

    #[test]
    fn test_star_within_rose() {
        for p in generate(ShapeKind::Star, 2000, &mut rng()) {
            let r = (p.x * p.x + p.y * p.y).sqrt();
            let theta = p.y.atan2(p.x);
            assert!(r <= 3.0 + 2.0 * (5.0 * theta).cos() + 1e-3);
            assert!(p.z.abs() <= 1.0);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate(ShapeKind::Star, 64, &mut SmallRng::seed_from_u64(3));
        let b = generate(ShapeKind::Star, 64, &mut SmallRng::seed_from_u64(3));
        let c = generate(ShapeKind::Star, 64, &mut SmallRng::seed_from_u64(4));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_parse_names() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.name().parse::<ShapeKind>(), Ok(kind));
        }
        assert_eq!("Heart".parse::<ShapeKind>(), Ok(ShapeKind::Love));
        assert_eq!(
            "dodecahedron".parse::<ShapeKind>(),
            Err(ShapeError::Unknown("dodecahedron".into()))
        );
    }

    #[test]
    fn test_scatter_range() {
        for p in scatter(500, &mut rng()) {
            assert!(p.abs().max_element() <= 5.0);
        }
    }
}
