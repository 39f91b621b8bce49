//! # Portrait View
//!
//! Ties one particle field to one surface and the page around it.
//!
//! ```text
//! frame(dt, t):
//! ┌────────────────────────────────────────────────────────────┐
//! │ 1. drain input events                                      │
//! │    ├─ Resized              → resize surface, regenerate    │
//! │    ├─ ReducedMotionChanged → regenerate with new count     │
//! │    ├─ PointerMoved         → update pointer                │
//! │    └─ Teardown             → stop, no step                 │
//! │ 2. read phase from the shared cell                         │
//! │ 3. ease surface effect toward the phase's look             │
//! │ 4. step the field                                          │
//! │ 5. paint                                                   │
//! └────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use lumina_core::{Phase, PhaseCell};
use lumina_procedural::PortraitSeed;
use lumina_rendering::{Frame, PaintStats, ParticlePainter, Surface, SurfaceEffect};
use lumina_ui::{Animation, PointerState};

use crate::config::LuminaConfig;
use crate::events::{EventReceiver, PortraitEvent};
use crate::simulator::{ParticleField, StepStats};

/// The element the portrait fills: its size and where it sits on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Left edge in client space.
    pub origin_x: f64,
    /// Top edge in client space.
    pub origin_y: f64,
}

impl Container {
    /// A container at the client origin.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }

    /// Moves the container's top-left corner.
    #[must_use]
    pub const fn at(mut self, origin_x: f64, origin_y: f64) -> Self {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self
    }
}

/// What one frame did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Phase the frame ran in.
    pub phase: Phase,
    /// Input events applied before the step.
    pub events_processed: u32,
    /// Regenerations triggered by those events.
    pub regenerations: u32,
    /// Simulator summary.
    pub step: StepStats,
    /// Painter summary.
    pub paint: PaintStats,
    /// Step time in microseconds.
    pub step_us: u64,
    /// Paint time in microseconds.
    pub paint_us: u64,
}

/// A mounted particle portrait.
#[derive(Debug)]
pub struct PortraitView {
    phase: PhaseCell,
    events: Option<EventReceiver>,
    pointer: PointerState,
    field: ParticleField,
    surface: Surface,
    painter: ParticlePainter,
    blur: Animation,
    opacity: Animation,
    particle_count: usize,
    reduced_particle_count: usize,
    reduced_motion: bool,
}

impl PortraitView {
    /// Mounts a view into `container` and generates the first particle set.
    ///
    /// Returns `None` without side effects when there is no container.
    #[must_use]
    pub fn mount(
        container: Option<Container>,
        config: &LuminaConfig,
        phase: PhaseCell,
        events: EventReceiver,
    ) -> Option<Self> {
        let Some(container) = container else {
            tracing::debug!("No container to mount into; portrait disabled");
            return None;
        };

        let seed = config.seed.map_or_else(PortraitSeed::from_clock, PortraitSeed::new);
        let mut pointer = PointerState::new();
        pointer.set_surface_origin(container.origin_x, container.origin_y);

        let mut view = Self {
            phase,
            events: Some(events),
            pointer,
            field: ParticleField::new(seed),
            surface: Surface::new(container.width, container.height),
            painter: ParticlePainter::new(),
            blur: Animation::new(SurfaceEffect::NONE.blur_radius),
            opacity: Animation::new(SurfaceEffect::NONE.opacity),
            particle_count: config.particle_count,
            reduced_particle_count: config.reduced_particle_count,
            reduced_motion: config.reduced_motion,
        };
        view.regenerate();

        tracing::info!(
            "Mounted portrait {}x{} (seed {:#x})",
            container.width,
            container.height,
            seed.value()
        );
        Some(view)
    }

    /// Installs the hook called when a phase's motion has finished.
    pub fn on_animation_complete(&mut self, hook: impl FnMut(Phase) + 'static) {
        self.field.set_completion_hook(hook);
    }

    /// Runs one frame. Returns `None` once the view has been torn down.
    ///
    /// `dt` is seconds since the previous frame; `time` is wall-clock seconds.
    pub fn frame(&mut self, dt: f32, time: f64) -> Option<FrameReport> {
        let mut report = FrameReport::default();
        if !self.apply_events(&mut report) {
            return None;
        }

        let phase = self.phase.get();
        report.phase = phase;

        let look = if phase == Phase::Liquid {
            SurfaceEffect::LIQUID
        } else {
            SurfaceEffect::NONE
        };
        self.blur.set_target(look.blur_radius);
        self.opacity.set_target(look.opacity);
        self.blur.update(dt);
        self.opacity.update(dt);

        let started = Instant::now();
        report.step = self.field.step(phase, self.pointer.local(), time);
        let stepped = Instant::now();
        report.paint = self.field.paint(&mut self.painter, &mut self.surface, phase);

        report.step_us = stepped.duration_since(started).as_micros() as u64;
        report.paint_us = stepped.elapsed().as_micros() as u64;
        Some(report)
    }

    /// Composites the surface through the current effect.
    #[must_use]
    pub fn present(&self) -> Frame {
        self.surface.present(&self.effect())
    }

    /// Current whole-surface effect.
    #[must_use]
    pub fn effect(&self) -> SurfaceEffect {
        SurfaceEffect {
            blur_radius: self.blur.value(),
            opacity: self.opacity.value(),
        }
    }

    /// Stops the view. Listener sends fail from here on.
    pub fn teardown(&mut self) {
        if self.events.take().is_some() {
            tracing::info!(
                "Portrait torn down after {} frames",
                self.field.frames()
            );
        }
    }

    /// True once torn down.
    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.events.is_none()
    }

    /// The particle field.
    #[must_use]
    pub const fn field(&self) -> &ParticleField {
        &self.field
    }

    /// The drawing surface.
    #[must_use]
    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Pointer state.
    #[must_use]
    pub const fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Particles per generation under the current preference.
    #[must_use]
    pub const fn particle_count(&self) -> usize {
        if self.reduced_motion {
            self.reduced_particle_count
        } else {
            self.particle_count
        }
    }

    /// Applies pending events. Returns `false` if the view is (now) torn down.
    fn apply_events(&mut self, report: &mut FrameReport) -> bool {
        let Some(events) = self.events.as_ref() else {
            return false;
        };

        let mut regenerate = false;
        for event in events.drain() {
            report.events_processed += 1;
            match event {
                PortraitEvent::Resized {
                    width,
                    height,
                    origin_x,
                    origin_y,
                } => {
                    self.pointer.set_surface_origin(origin_x, origin_y);
                    if (width, height) != (self.surface.width(), self.surface.height()) {
                        tracing::debug!("Resize to {}x{}", width, height);
                        self.surface.resize(width, height);
                        regenerate = true;
                    }
                }
                PortraitEvent::PointerMoved { client_x, client_y } => {
                    self.pointer.pointer_moved(client_x, client_y);
                }
                PortraitEvent::ReducedMotionChanged(reduced) => {
                    if reduced != self.reduced_motion {
                        tracing::debug!("Reduced motion {}", if reduced { "on" } else { "off" });
                        self.reduced_motion = reduced;
                        regenerate = true;
                    }
                }
                PortraitEvent::Teardown => {
                    self.teardown();
                    return false;
                }
            }
        }

        if regenerate {
            self.regenerate();
            report.regenerations += 1;
        }
        true
    }

    fn regenerate(&mut self) {
        let count = self.particle_count();
        self.field
            .regenerate(count, self.surface.width(), self.surface.height());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;
    use lumina_core::Vec2;

    fn config() -> LuminaConfig {
        LuminaConfig {
            seed: Some(5),
            particle_count: 120,
            reduced_particle_count: 40,
            ..LuminaConfig::default()
        }
    }

    fn mount(width: u32, height: u32) -> (PortraitView, PhaseCell, crate::EventSender) {
        let cell = PhaseCell::default();
        let (sender, receiver) = EventBus::new().split();
        let view = PortraitView::mount(Some(Container::new(width, height)), &config(), cell.clone(), receiver)
            .expect("container present");
        (view, cell, sender)
    }

    #[test]
    fn test_mount_without_container_is_none() {
        let (_, receiver) = EventBus::new().split();
        assert!(PortraitView::mount(None, &config(), PhaseCell::default(), receiver).is_none());
    }

    #[test]
    fn test_mount_generates_configured_count() {
        let (view, _, _) = mount(200, 100);
        assert_eq!(view.field().len(), 120);
        assert_eq!(view.field().size(), (200.0, 100.0));
    }

    #[test]
    fn test_reduced_motion_event_regenerates() {
        let (mut view, _, sender) = mount(200, 200);
        sender.send(PortraitEvent::ReducedMotionChanged(true));
        let report = view.frame(1.0 / 60.0, 0.0).unwrap();
        assert_eq!(report.regenerations, 1);
        assert_eq!(view.field().len(), 40);

        // Same value again is not a change
        sender.send(PortraitEvent::ReducedMotionChanged(true));
        assert_eq!(view.frame(1.0 / 60.0, 0.0).unwrap().regenerations, 0);
    }

    #[test]
    fn test_move_without_resize_keeps_particles() {
        let (mut view, _, sender) = mount(200, 200);
        let before = view.field().generation();
        sender.resized(200, 200, 30.0, 40.0);
        view.frame(0.0, 0.0);
        assert_eq!(view.field().generation(), before);
        assert_eq!(view.pointer().surface_origin(), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_liquid_effect_eases_in_over_one_second() {
        let (mut view, cell, _) = mount(64, 64);
        cell.set(Phase::Liquid);

        view.frame(0.5, 0.0);
        let halfway = view.effect();
        assert!(halfway.blur_radius > 0.0 && halfway.blur_radius < 2.0);
        assert!(halfway.opacity < 1.0 && halfway.opacity > 0.8);

        view.frame(0.6, 0.0);
        assert_eq!(view.effect(), SurfaceEffect::LIQUID);

        cell.set(Phase::Dispersing);
        for _ in 0..70 {
            view.frame(1.0 / 60.0, 0.0);
        }
        assert_eq!(view.effect(), SurfaceEffect::NONE);
    }

    #[test]
    fn test_resize_survives_pointer_flood() {
        let (mut view, _, sender) = mount(200, 200);
        for i in 0..5000 {
            assert!(sender.pointer_moved(f64::from(i % 200), 50.0));
        }
        assert!(sender.resized(400, 300, 0.0, 0.0));

        let report = view.frame(1.0 / 60.0, 0.0).unwrap();
        assert_eq!(report.events_processed, 2);
        assert_eq!(report.regenerations, 1);
        assert_eq!(view.field().size(), (400.0, 300.0));
        assert_eq!(view.pointer().local(), Some(Vec2::new(199.0, 50.0)));
    }

    #[test]
    fn test_teardown_survives_pointer_flood() {
        let (mut view, _, sender) = mount(50, 50);
        for _ in 0..5000 {
            sender.pointer_moved(10.0, 10.0);
        }
        assert!(sender.send(PortraitEvent::Teardown));
        assert!(view.frame(0.016, 0.0).is_none());
        assert!(view.is_torn_down());
    }

    #[test]
    fn test_teardown_event_stops_frames() {
        let (mut view, _, sender) = mount(50, 50);
        assert!(sender.send(PortraitEvent::Teardown));
        assert!(view.frame(0.016, 0.0).is_none());
        assert!(view.is_torn_down());
        assert!(!sender.pointer_moved(1.0, 1.0));
        assert!(view.frame(0.016, 0.0).is_none());
    }
}
