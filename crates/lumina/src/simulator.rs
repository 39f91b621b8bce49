//! # Particle Field Simulator
//!
//! Owns the particle set and advances it one frame at a time.
//!
//! ## Frame step
//!
//! ```text
//! for each particle:
//!   1. goal displacement d, gain s   (from the phase)
//!   2. pointer nudge                 (holding / liquid, within 100px)
//!   3. velocity = velocity·0.9 + d·s
//!   4. position += velocity·0.05
//! ```
//!
//! | phase      | d                                   | s                |
//! |------------|-------------------------------------|------------------|
//! | assembling | target − position                   | 0.04 + U[0,0.02) |
//! | holding    | target + hover(t) − position        | 0.1              |
//! | liquid     | target + hover(t) − position        | 0.1              |
//! | dispersing | 500 · unit(position − center)       | 0.02             |
//!
//! Phase changes never touch particle state; only regeneration does.

use lumina_core::{Particle, Phase, Vec2};
use lumina_procedural::{FaceGenerator, PortraitSeed};
use lumina_rendering::{PaintStats, ParticlePainter, Surface};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Velocity retained from the previous frame.
pub const DAMPING: f64 = 0.9;
/// Fraction of velocity applied to position per frame.
pub const VELOCITY_SCALE: f64 = 0.05;
/// Minimum assembling gain.
pub const ASSEMBLE_GAIN: f64 = 0.04;
/// Random assembling gain spread, per particle per frame.
pub const ASSEMBLE_GAIN_JITTER: f64 = 0.02;
/// Gain toward the hovering goal.
pub const HOVER_GAIN: f64 = 0.1;
/// Hover amplitude in pixels.
pub const HOVER_AMPLITUDE: f64 = 2.0;
/// Outward push magnitude while dispersing.
pub const DISPERSE_PUSH: f64 = 500.0;
/// Gain on the outward push.
pub const DISPERSE_GAIN: f64 = 0.02;
/// Pointer repulsion radius in pixels.
pub const POINTER_RADIUS: f64 = 100.0;
/// Pointer nudge per frame in pixels.
pub const POINTER_PUSH: f64 = 2.0;
/// Mean goal distance under which a converging phase counts as settled.
pub const SETTLE_DISTANCE: f64 = 1.0;

/// Stream id for per-frame gain noise.
const GAIN_STREAM: u64 = 0x6741_494e;

/// Called when the current phase's motion has visibly finished.
pub type CompletionHook = Box<dyn FnMut(Phase)>;

/// Summary of the most recent step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepStats {
    /// Phase the step ran in.
    pub phase: Phase,
    /// Mean distance from each particle to its phase goal, after the step.
    pub mean_goal_distance: f64,
    /// Particles outside the surface bounds, after the step.
    pub outside: usize,
    /// Particles nudged by the pointer.
    pub repelled: usize,
}

/// The animated particle set.
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    generator: FaceGenerator,
    gain_rng: ChaCha8Rng,
    frames: u64,
    last: StepStats,
    on_complete: Option<CompletionHook>,
    /// Phase seen on the previous step; a change re-arms the hook.
    armed_for: Option<Phase>,
    completed: bool,
}

impl ParticleField {
    /// Creates an empty field. Call [`regenerate`](Self::regenerate) to fill it.
    #[must_use]
    pub fn new(seed: PortraitSeed) -> Self {
        Self {
            particles: Vec::new(),
            width: 0.0,
            height: 0.0,
            generator: FaceGenerator::new(seed),
            gain_rng: seed.derive(GAIN_STREAM).rng(),
            frames: 0,
            last: StepStats::default(),
            on_complete: None,
            armed_for: None,
            completed: false,
        }
    }

    /// Installs the completion hook.
    pub fn set_completion_hook(&mut self, hook: impl FnMut(Phase) + 'static) {
        self.on_complete = Some(Box::new(hook));
    }

    /// Replaces the whole particle set for a `width` x `height` surface.
    pub fn regenerate(&mut self, count: usize, width: u32, height: u32) {
        self.width = f64::from(width);
        self.height = f64::from(height);
        self.particles = self.generator.generate(count, width as f32, height as f32);
        self.completed = false;

        tracing::info!(
            "Regenerated {} particles for {}x{} (generation {})",
            count,
            width,
            height,
            self.generator.generation()
        );
    }

    /// Current particles.
    #[inline]
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True if there are no particles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Surface size the set was generated for.
    #[must_use]
    pub const fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Surface center.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Steps taken since creation.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Regenerations performed.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generator.generation()
    }

    /// Stats from the most recent [`step`](Self::step).
    #[must_use]
    pub const fn last_stats(&self) -> StepStats {
        self.last
    }

    /// Advances every particle by one frame.
    ///
    /// `pointer` is surface-local and `None` until the pointer has been
    /// seen. `time` is wall-clock seconds and drives the hover wobble.
    pub fn step(&mut self, phase: Phase, pointer: Option<Vec2>, time: f64) -> StepStats {
        let center = self.center();
        let (width, height) = (self.width, self.height);
        let repel_from = pointer.filter(|_| phase.is_hovering());

        let mut stats = StepStats {
            phase,
            ..StepStats::default()
        };
        let mut goal_distance_sum = 0.0;

        for p in &mut self.particles {
            let (goal, gain) = match phase {
                Phase::Assembling => (
                    p.target,
                    ASSEMBLE_GAIN + self.gain_rng.gen_range(0.0..ASSEMBLE_GAIN_JITTER),
                ),
                Phase::Holding | Phase::Liquid => (p.target + hover(p.target, time), HOVER_GAIN),
                Phase::Dispersing => {
                    let outward = Vec2::from_angle((p.position - center).angle());
                    (p.position + outward * DISPERSE_PUSH, DISPERSE_GAIN)
                }
            };
            let d = goal - p.position;

            if let Some(pointer) = repel_from {
                let away = p.position - pointer;
                if away.length() < POINTER_RADIUS {
                    p.position += Vec2::from_angle(away.angle()) * POINTER_PUSH;
                    stats.repelled += 1;
                }
            }

            p.velocity = p.velocity * DAMPING + d * gain;
            p.position += p.velocity * VELOCITY_SCALE;

            if phase != Phase::Dispersing {
                goal_distance_sum += p.position.distance(goal);
            }
            if !in_bounds(p.position, width, height) {
                stats.outside += 1;
            }
        }

        if !self.particles.is_empty() {
            stats.mean_goal_distance = goal_distance_sum / self.particles.len() as f64;
        }
        self.frames += 1;
        self.last = stats;
        self.check_completion(&stats);
        stats
    }

    /// Clears `surface` and paints the field in the style of `phase`.
    pub fn paint(&self, painter: &mut ParticlePainter, surface: &mut Surface, phase: Phase) -> PaintStats {
        painter.paint(surface, &self.particles, phase)
    }

    fn check_completion(&mut self, stats: &StepStats) {
        if self.armed_for != Some(stats.phase) {
            self.armed_for = Some(stats.phase);
            self.completed = false;
        }
        if self.completed || self.particles.is_empty() {
            return;
        }

        let done = match stats.phase {
            Phase::Dispersing => stats.outside == self.particles.len(),
            Phase::Assembling | Phase::Holding | Phase::Liquid => {
                stats.mean_goal_distance < SETTLE_DISTANCE
            }
        };
        if done {
            self.completed = true;
            tracing::debug!("Phase {} settled after {} frames", stats.phase, self.frames);
            if let Some(hook) = self.on_complete.as_mut() {
                hook(stats.phase);
            }
        }
    }
}

impl std::fmt::Debug for ParticleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleField")
            .field("particles", &self.particles.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("generation", &self.generator.generation())
            .field("frames", &self.frames)
            .field("has_hook", &self.on_complete.is_some())
            .finish_non_exhaustive()
    }
}

/// Hover wobble for a target at `time` seconds.
#[inline]
fn hover(target: Vec2, time: f64) -> Vec2 {
    Vec2::new(
        (time + target.y).sin() * HOVER_AMPLITUDE,
        (time + target.x).cos() * HOVER_AMPLITUDE,
    )
}

#[inline]
fn in_bounds(position: Vec2, width: f64, height: f64) -> bool {
    (0.0..=width).contains(&position.x) && (0.0..=height).contains(&position.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use lumina_core::{Color, Region};

    fn field(count: usize, width: u32, height: u32) -> ParticleField {
        let mut field = ParticleField::new(PortraitSeed::new(11));
        field.regenerate(count, width, height);
        field
    }

    fn single(position: Vec2, target: Vec2) -> ParticleField {
        let mut field = field(0, 200, 200);
        field.particles = vec![Particle::new(target, position, Region::Oval, Color::WHITE)];
        field
    }

    fn mean_target_distance(field: &ParticleField) -> f64 {
        let sum: f64 = field.particles().iter().map(Particle::distance_to_target).sum();
        sum / field.len() as f64
    }

    #[test]
    fn test_assembling_converges() {
        let mut field = field(300, 400, 300);
        let before = mean_target_distance(&field);
        for frame in 0..600 {
            field.step(Phase::Assembling, None, f64::from(frame) / 60.0);
        }
        assert!(mean_target_distance(&field) < before * 0.01);
    }

    #[test]
    fn test_single_step_matches_integration_rule() {
        let mut field = single(Vec2::new(100.0, 100.0), Vec2::new(110.0, 100.0));
        field.step(Phase::Holding, None, 0.0);

        // goal = target + (sin(0 + 100)·2, cos(0 + 110)·2)
        let goal = Vec2::new(110.0 + 100.0_f64.sin() * 2.0, 100.0 + 110.0_f64.cos() * 2.0);
        let d = goal - Vec2::new(100.0, 100.0);
        let p = field.particles()[0];
        assert!((p.velocity.x - d.x * 0.1).abs() < 1e-12);
        assert!((p.velocity.y - d.y * 0.1).abs() < 1e-12);
        assert!((p.position.x - (100.0 + d.x * 0.1 * 0.05)).abs() < 1e-12);
    }

    #[test]
    fn test_dispersing_moves_outward() {
        let mut field = field(200, 300, 300);
        let center = field.center();
        let mut previous: Vec<f64> = field.particles().iter().map(|p| p.position.distance(center)).collect();

        for _ in 0..120 {
            field.step(Phase::Dispersing, None, 0.0);
            for (p, before) in field.particles().iter().zip(&mut previous) {
                let now = p.position.distance(center);
                assert!(now + 1e-9 >= *before);
                *before = now;
            }
        }
    }

    #[test]
    fn test_dispersing_particle_at_center_moves_right() {
        let mut field = single(Vec2::new(100.0, 100.0), Vec2::new(100.0, 100.0));
        field.step(Phase::Dispersing, None, 0.0);
        let p = field.particles()[0];
        assert!(p.position.x > 100.0);
        assert!((p.position.y - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_pointer_repels_only_while_hovering() {
        let start = Vec2::new(100.0, 100.0);
        let pointer = Some(Vec2::new(90.0, 100.0));

        let mut hovering = single(start, start);
        assert_eq!(hovering.step(Phase::Liquid, pointer, 0.0).repelled, 1);

        let mut assembling = single(start, start);
        assert_eq!(assembling.step(Phase::Assembling, pointer, 0.0).repelled, 0);

        let mut far = single(start, start);
        assert_eq!(far.step(Phase::Holding, Some(Vec2::new(300.0, 300.0)), 0.0).repelled, 0);

        let mut without = single(start, start);
        assert_eq!(without.step(Phase::Holding, None, 0.0).repelled, 0);

        // Nudged away from the pointer by about 2px, plus a sub-pixel hover pull
        let moved = hovering.particles()[0].position;
        assert!(moved.x > 101.5);
    }

    #[test]
    fn test_phase_change_keeps_particle_state() {
        let mut field = field(50, 200, 200);
        for _ in 0..30 {
            field.step(Phase::Liquid, None, 1.0);
        }
        let before = field.particles().to_vec();
        let center = field.center();
        field.step(Phase::Dispersing, None, 1.0);

        for (a, b) in before.iter().zip(field.particles()) {
            assert_eq!(a.target, b.target);
            assert_eq!(a.color, b.color);
            // Velocity carries over: damped, plus the outward push
            let push = Vec2::from_angle((a.position - center).angle()) * (DISPERSE_PUSH * DISPERSE_GAIN);
            let expected = a.velocity * DAMPING + push;
            assert!((b.velocity - expected).length() < 1e-6);
            assert!((b.position - (a.position + expected * VELOCITY_SCALE)).length() < 1e-6);
        }
    }

    #[test]
    fn test_zero_size_surface_stays_finite() {
        let mut field = field(40, 0, 0);
        for phase in Phase::ALL {
            for _ in 0..50 {
                field.step(phase, Some(Vec2::ZERO), 3.0);
            }
        }
        assert!(field.particles().iter().all(|p| p.position.is_finite() && p.velocity.is_finite()));
    }

    #[test]
    fn test_completion_fires_once_per_phase_entry() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut field = single(Vec2::new(100.0, 100.0), Vec2::new(100.0, 100.0));
        let sink = Rc::clone(&calls);
        field.set_completion_hook(move |phase| sink.borrow_mut().push(phase));

        for _ in 0..5 {
            field.step(Phase::Assembling, None, 0.0);
        }
        assert_eq!(*calls.borrow(), vec![Phase::Assembling]);

        for _ in 0..400 {
            field.step(Phase::Dispersing, None, 0.0);
        }
        assert_eq!(*calls.borrow(), vec![Phase::Assembling, Phase::Dispersing]);

        field.step(Phase::Assembling, None, 0.0);
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn test_hovering_phases_complete_once_per_entry() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut field = single(Vec2::new(100.0, 100.0), Vec2::new(100.0, 100.0));
        let sink = Rc::clone(&calls);
        field.set_completion_hook(move |phase| sink.borrow_mut().push(phase));

        // The goal wobbles 2px around the target; tracking it settles under 1px
        let mut time = 0.0;
        for _ in 0..600 {
            field.step(Phase::Holding, None, time);
            time += 1.0 / 60.0;
        }
        assert_eq!(*calls.borrow(), vec![Phase::Holding]);
        assert!(field.last_stats().mean_goal_distance < SETTLE_DISTANCE);

        for _ in 0..600 {
            field.step(Phase::Liquid, None, time);
            time += 1.0 / 60.0;
        }
        assert_eq!(*calls.borrow(), vec![Phase::Holding, Phase::Liquid]);

        // Re-entering holding re-arms it
        field.step(Phase::Holding, None, time);
        assert_eq!(*calls.borrow(), vec![Phase::Holding, Phase::Liquid, Phase::Holding]);
    }

    #[test]
    fn test_empty_field_never_completes() {
        let fired = Rc::new(RefCell::new(false));
        let mut field = field(0, 100, 100);
        let flag = Rc::clone(&fired);
        field.set_completion_hook(move |_| *flag.borrow_mut() = true);
        field.step(Phase::Assembling, None, 0.0);
        assert!(!*fired.borrow());
    }

    #[test]
    fn test_regenerate_replaces_everything() {
        let mut field = field(100, 200, 200);
        let first = field.particles().to_vec();
        field.regenerate(100, 320, 240);

        assert_eq!(field.len(), 100);
        assert_eq!(field.size(), (320.0, 240.0));
        assert_eq!(field.generation(), 2);
        assert!(first.iter().zip(field.particles()).all(|(a, b)| a.target != b.target));
    }
}
