//! # Face-Shape Point Generator
//!
//! Each particle independently picks a region and samples a target inside it:
//!
//! ```text
//!   r in [0.00, 0.60)  oval   filled ellipse, 0.85 x 1.1 of scale
//!   r in [0.60, 0.75)  eye    flattened disc, left or right
//!   r in [0.75, 0.85)  nose   narrow vertical strip below the eyes
//!   r in [0.85, 1.00)  mouth  quadratic smile arc
//! ```
//!
//! `scale = 0.35 * min(width, height)` and everything is centered on the
//! surface. Disc and oval radii use `sqrt(U)` so density is uniform per area
//! instead of clumping at the center.

use std::f64::consts::TAU;

use lumina_core::{Color, Particle, Region, Vec2};
use rand::Rng;

use crate::seed::PortraitSeed;

/// Fraction of `min(width, height)` used as the face scale.
pub const FACE_SCALE: f64 = 0.35;

/// Cumulative region cutoffs for the selector draw.
const OVAL_CUTOFF: f64 = 0.60;
const EYE_CUTOFF: f64 = 0.75;
const NOSE_CUTOFF: f64 = 0.85;

/// Oval half-axes as multiples of scale.
pub const OVAL_RADIUS_X: f64 = 0.85;
/// Oval vertical half-axis as a multiple of scale.
pub const OVAL_RADIUS_Y: f64 = 1.1;

const EYE_OFFSET_X: f64 = 0.35;
const EYE_OFFSET_Y: f64 = -0.10;
const EYE_RADIUS: f64 = 0.10;
const EYE_FLATTEN: f64 = 0.6;

const NOSE_TOP: f64 = -0.10;
const NOSE_LENGTH: f64 = 0.40;
const NOSE_WIDTH: f64 = 0.10;
/// Absolute pixel jitter across the nose, +-2.5px.
const NOSE_JITTER_PX: f64 = 5.0;

const MOUTH_WIDTH: f64 = 0.40;
const MOUTH_DROP: f64 = 0.5;

/// Center and scale of the face for one surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceLayout {
    /// Surface width in pixels.
    pub width: f64,
    /// Surface height in pixels.
    pub height: f64,
    /// Surface center.
    pub center: Vec2,
    /// `0.35 * min(width, height)`.
    pub scale: f64,
}

impl FaceLayout {
    /// Computes the layout for a surface.
    ///
    /// Negative or non-finite sizes are treated as zero, so every coordinate
    /// derived from the layout stays finite.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        let width = sanitize_extent(width);
        let height = sanitize_extent(height);
        Self {
            width,
            height,
            center: Vec2::new(width / 2.0, height / 2.0),
            scale: width.min(height) * FACE_SCALE,
        }
    }

    /// Returns true if `point` lies inside the face oval (boundary included).
    #[must_use]
    pub fn oval_contains(&self, point: Vec2) -> bool {
        if self.scale <= 0.0 {
            return point == self.center;
        }
        let nx = (point.x - self.center.x) / (OVAL_RADIUS_X * self.scale);
        let ny = (point.y - self.center.y) / (OVAL_RADIUS_Y * self.scale);
        // Tolerance covers rounding in cos/sin at the rim.
        nx * nx + ny * ny <= 1.0 + 1e-9
    }

    /// Samples one particle: region, target, scattered start and color.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Particle {
        let (region, target) = self.sample_target(rng);
        let position = Vec2::new(rng.gen::<f64>() * self.width, rng.gen::<f64>() * self.height);
        Particle::new(target, position, region, sample_color(rng))
    }

    /// Picks a region and a target inside it.
    pub fn sample_target<R: Rng + ?Sized>(&self, rng: &mut R) -> (Region, Vec2) {
        let selector: f64 = rng.gen();
        let scale = self.scale;
        let center = self.center;

        if selector < OVAL_CUTOFF {
            let theta = rng.gen::<f64>() * TAU;
            let fill = rng.gen::<f64>().sqrt();
            let offset = Vec2::new(
                theta.cos() * scale * OVAL_RADIUS_X * fill,
                theta.sin() * scale * OVAL_RADIUS_Y * fill,
            );
            (Region::Oval, center + offset)
        } else if selector < EYE_CUTOFF {
            let is_left = rng.gen_bool(0.5);
            let eye_x = if is_left { -scale * EYE_OFFSET_X } else { scale * EYE_OFFSET_X };
            let eye_y = scale * EYE_OFFSET_Y;
            let theta = rng.gen::<f64>() * TAU;
            let radius = scale * EYE_RADIUS * rng.gen::<f64>().sqrt();
            let offset = Vec2::new(
                eye_x + theta.cos() * radius,
                eye_y + theta.sin() * radius * EYE_FLATTEN,
            );
            (Region::Eye, center + offset)
        } else if selector < NOSE_CUTOFF {
            let drop = scale * NOSE_LENGTH * rng.gen::<f64>();
            let spread = scale * NOSE_WIDTH * (rng.gen::<f64>() - 0.5);
            let jitter = (rng.gen::<f64>() - 0.5) * NOSE_JITTER_PX;
            let offset = Vec2::new(spread + jitter, scale * NOSE_TOP + drop);
            (Region::Nose, center + offset)
        } else {
            let mouth_width = scale * MOUTH_WIDTH;
            let mx = (rng.gen::<f64>() - 0.5) * mouth_width;
            let curve = if mouth_width > 0.0 {
                (mx * mx) / mouth_width * MOUTH_DROP
            } else {
                0.0
            };
            let offset = Vec2::new(mx, scale * 0.5 + curve);
            (Region::Mouth, center + offset)
        }
    }
}

/// Blue-white tint: R in [200,255), G in [230,255), B = 255, A in [0.3,0.8).
fn sample_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    let r = 200.0 + rng.gen::<f32>() * 55.0;
    let g = 230.0 + rng.gen::<f32>() * 25.0;
    let a = 0.3 + rng.gen::<f32>() * 0.5;
    Color::from_channels(r, g, 255.0, a)
}

fn sanitize_extent(extent: f32) -> f64 {
    if extent.is_finite() && extent > 0.0 {
        f64::from(extent)
    } else {
        0.0
    }
}

/// Generates `count` particles for a `width` x `height` surface.
///
/// Targets approximate a face; positions are uniform within the surface and
/// velocities start at zero.
pub fn generate_face_points<R: Rng + ?Sized>(
    count: usize,
    width: f32,
    height: f32,
    rng: &mut R,
) -> Vec<Particle> {
    let layout = FaceLayout::new(width, height);
    let mut particles = Vec::with_capacity(count);
    for _ in 0..count {
        particles.push(layout.sample(rng));
    }
    particles
}

/// Seeded generator that draws every regeneration from a fresh sub-stream.
#[derive(Debug, Clone)]
pub struct FaceGenerator {
    seed: PortraitSeed,
    generation: u64,
}

impl FaceGenerator {
    /// Creates a generator for `seed`.
    #[must_use]
    pub const fn new(seed: PortraitSeed) -> Self {
        Self { seed, generation: 0 }
    }

    /// Generates a complete particle set and advances to the next sub-stream.
    pub fn generate(&mut self, count: usize, width: f32, height: f32) -> Vec<Particle> {
        let mut rng = self.seed.derive(self.generation).rng();
        self.generation += 1;
        generate_face_points(count, width, height, &mut rng)
    }

    /// Number of sets generated so far.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Seed this generator was created with.
    #[must_use]
    pub const fn seed(&self) -> PortraitSeed {
        self.seed
    }
}
