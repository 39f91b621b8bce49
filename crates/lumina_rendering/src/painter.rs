//! Particle painter.
//!
//! Clears the surface and draws every particle at its current position:
//! a 1.2px square normally, a 2.5px-radius disc in the liquid phase.

use lumina_core::{Particle, Phase};

use crate::surface::Surface;

/// How a particle is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleShape {
    /// Filled square, top-left at the particle position.
    Square {
        /// Side length in pixels.
        size: f64,
    },
    /// Filled disc centered on the particle position.
    Disc {
        /// Radius in pixels.
        radius: f64,
    },
}

impl ParticleShape {
    /// Thin dot used outside the liquid phase.
    pub const DOT: Self = Self::Square { size: 1.2 };
    /// Soft droplet used in the liquid phase.
    pub const DROPLET: Self = Self::Disc { radius: 2.5 };

    /// Shape for a phase.
    #[must_use]
    pub const fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Liquid => Self::DROPLET,
            Phase::Assembling | Phase::Holding | Phase::Dispersing => Self::DOT,
        }
    }
}

/// Per-frame painting counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintStats {
    /// Particles handed to the surface.
    pub drawn: usize,
    /// Particles skipped for a non-finite position.
    pub skipped: usize,
}

/// Draws particle sets onto a [`Surface`].
#[derive(Debug, Default)]
pub struct ParticlePainter {
    last: PaintStats,
}

impl ParticlePainter {
    /// Creates a painter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears `surface` and draws `particles` in the style of `phase`.
    ///
    /// A zero-sized surface is left untouched.
    pub fn paint(&mut self, surface: &mut Surface, particles: &[Particle], phase: Phase) -> PaintStats {
        let mut stats = PaintStats::default();
        if surface.is_empty() {
            tracing::trace!("skipping paint on zero-sized surface");
            self.last = stats;
            return stats;
        }

        surface.clear();
        let shape = ParticleShape::for_phase(phase);

        for p in particles {
            if !p.position.is_finite() {
                stats.skipped += 1;
                continue;
            }
            match shape {
                ParticleShape::Square { size } => {
                    surface.fill_rect(p.position.x, p.position.y, size, size, p.color);
                }
                ParticleShape::Disc { radius } => {
                    surface.fill_circle(p.position.x, p.position.y, radius, p.color);
                }
            }
            stats.drawn += 1;
        }

        self.last = stats;
        stats
    }

    /// Counters from the most recent [`paint`](Self::paint).
    #[must_use]
    pub const fn last_stats(&self) -> PaintStats {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_core::{Color, Region, Vec2};

    fn particle_at(x: f64, y: f64) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::new(x, y), Region::Oval, Color::WHITE)
    }

    #[test]
    fn test_shape_per_phase() {
        assert_eq!(ParticleShape::for_phase(Phase::Liquid), ParticleShape::DROPLET);
        for phase in [Phase::Assembling, Phase::Holding, Phase::Dispersing] {
            assert_eq!(ParticleShape::for_phase(phase), ParticleShape::DOT);
        }
    }

    #[test]
    fn test_liquid_draws_larger_marks() {
        let particles = vec![particle_at(10.0, 10.0)];
        let mut painter = ParticlePainter::new();

        let mut dots = Surface::new(20, 20);
        painter.paint(&mut dots, &particles, Phase::Holding);
        let mut drops = Surface::new(20, 20);
        painter.paint(&mut drops, &particles, Phase::Liquid);

        assert!((dots.total_alpha() - 1.44).abs() < 1e-4);
        assert!(drops.total_alpha() > 10.0);
    }

    #[test]
    fn test_paint_clears_previous_frame() {
        let mut surface = Surface::new(20, 20);
        let mut painter = ParticlePainter::new();
        painter.paint(&mut surface, &[particle_at(2.0, 2.0)], Phase::Holding);
        painter.paint(&mut surface, &[particle_at(15.0, 15.0)], Phase::Holding);

        assert_eq!(surface.pixel(2, 2).map(|c| c.a), Some(0.0));
        assert!(surface.pixel(15, 15).map_or(0.0, |c| c.a) > 0.0);
    }

    #[test]
    fn test_non_finite_particles_are_skipped() {
        let mut surface = Surface::new(20, 20);
        let mut painter = ParticlePainter::new();
        let stats = painter.paint(
            &mut surface,
            &[particle_at(f64::NAN, 3.0), particle_at(4.0, 4.0)],
            Phase::Assembling,
        );
        assert_eq!(stats, PaintStats { drawn: 1, skipped: 1 });
        assert_eq!(painter.last_stats(), stats);
    }

    #[test]
    fn test_zero_sized_surface_paints_nothing() {
        let mut surface = Surface::new(0, 0);
        let mut painter = ParticlePainter::new();
        let stats = painter.paint(&mut surface, &[particle_at(0.0, 0.0)], Phase::Liquid);
        assert_eq!(stats.drawn, 0);
    }
}
