//! The particle entity and the face regions its target belongs to.

use crate::color::Color;
use crate::math::Vec2;

/// Face feature a particle's target was sampled from.
///
/// Stored on the particle as its `depth` tag; the mapping is one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Filled face oval.
    Oval,
    /// Left or right eye.
    Eye,
    /// Vertical nose strip.
    Nose,
    /// Smile arc.
    Mouth,
}

impl Region {
    /// All regions, in sampling order.
    pub const ALL: [Self; 4] = [Self::Oval, Self::Eye, Self::Nose, Self::Mouth];

    /// Depth tag written for this region.
    #[must_use]
    pub const fn depth(self) -> f32 {
        match self {
            Self::Oval => 0.0,
            Self::Mouth => 5.0,
            Self::Eye => 10.0,
            Self::Nose => 20.0,
        }
    }

    /// Looks up the region for a depth tag.
    ///
    /// Returns `None` for any value other than 0, 5, 10 or 20.
    #[must_use]
    pub fn from_depth(depth: f32) -> Option<Self> {
        Self::ALL.into_iter().find(|region| region.depth() == depth)
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Oval => "oval",
            Self::Eye => "eye",
            Self::Nose => "nose",
            Self::Mouth => "mouth",
        }
    }
}

/// A single portrait particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Destination in assembling/holding/liquid. Fixed after generation.
    pub target: Vec2,
    /// Current rendered position. Unconstrained.
    pub position: Vec2,
    /// Smoothed per-frame displacement.
    pub velocity: Vec2,
    /// Layering hint, one of 0/5/10/20. See [`Region::depth`].
    pub depth: f32,
    /// Fill color, fixed at generation.
    pub color: Color,
}

impl Particle {
    /// Creates a particle at rest.
    #[must_use]
    pub const fn new(target: Vec2, position: Vec2, region: Region, color: Color) -> Self {
        Self {
            target,
            position,
            velocity: Vec2::ZERO,
            depth: region.depth(),
            color,
        }
    }

    /// Region encoded by the depth tag.
    #[must_use]
    pub fn region(&self) -> Option<Region> {
        Region::from_depth(self.depth)
    }

    /// Distance from the current position to the target.
    #[inline]
    #[must_use]
    pub fn distance_to_target(&self) -> f64 {
        self.position.distance(self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_round_trip() {
        for region in Region::ALL {
            assert_eq!(Region::from_depth(region.depth()), Some(region));
        }
        assert_eq!(Region::from_depth(7.0), None);
    }

    #[test]
    fn test_new_particle_is_at_rest() {
        let p = Particle::new(
            Vec2::new(10.0, 10.0),
            Vec2::new(13.0, 14.0),
            Region::Nose,
            Color::WHITE,
        );
        assert_eq!(p.velocity, Vec2::ZERO);
        assert_eq!(p.region(), Some(Region::Nose));
        assert!((p.distance_to_target() - 5.0).abs() < 1e-12);
    }
}
