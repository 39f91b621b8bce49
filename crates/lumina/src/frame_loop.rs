//! # Frame Loop
//!
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. CLOCK                                                            │
//! │    └─ dt from the virtual clock, or measured wall time (real time)  │
//! │                                                                     │
//! │ 2. PHASE DRIVER                                                     │
//! │    └─ advance timer, publish phase to the shared cell               │
//! │                                                                     │
//! │ 3. VIEW                                                             │
//! │    ├─ drain input events (resize, pointer, preferences)             │
//! │    ├─ step particle field                                           │
//! │    └─ paint surface                                                 │
//! │                                                                     │
//! │ 4. END FRAME                                                        │
//! │    ├─ record stats                                                  │
//! │    └─ sleep to the frame budget (real time only)                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The loop owns the view, so nothing else can write the particle field
//! while a frame runs.

use std::time::{Duration, Instant};

use lumina_core::Phase;
use lumina_ui::PhaseDriver;

use crate::config::FrameConfig;
use crate::view::{FrameReport, PortraitView};

/// Maximum `dt` handed to the driver and view, in seconds.
///
/// A stalled host (backgrounded tab, debugger) should not skip phases.
pub const MAX_DELTA: f32 = 0.1;

/// Frame timing statistics.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameStats {
    /// Total frame time in microseconds.
    pub total_us: u64,
    /// Particle step time in microseconds.
    pub step_us: u64,
    /// Paint time in microseconds.
    pub paint_us: u64,
    /// Frame number.
    pub frame: u64,
    /// Input events processed this frame.
    pub events_processed: u32,
    /// Phase the frame ran in.
    pub phase: Phase,
}

/// Drives a [`PortraitView`] and its [`PhaseDriver`] frame by frame.
#[derive(Debug)]
pub struct FrameLoop {
    view: PortraitView,
    driver: PhaseDriver,
    config: FrameConfig,
    budget: Duration,
    frame_count: u64,
    /// Seconds on the loop's clock.
    clock: f64,
    last_frame_time: Instant,
    stats_accumulator: FrameStatsAccumulator,
}

impl FrameLoop {
    /// Creates a loop around a mounted view.
    #[must_use]
    pub fn new(view: PortraitView, driver: PhaseDriver, config: FrameConfig) -> Self {
        let budget = Duration::from_secs_f64(1.0 / f64::from(config.target_fps.max(1)));
        Self {
            view,
            driver,
            config,
            budget,
            frame_count: 0,
            clock: 0.0,
            last_frame_time: Instant::now(),
            stats_accumulator: FrameStatsAccumulator::new(budget),
        }
    }

    /// Runs one frame. Returns `None` once the view has been torn down.
    pub fn tick(&mut self) -> Option<FrameStats> {
        let started = Instant::now();
        let dt = if self.config.realtime {
            let delta = started.duration_since(self.last_frame_time);
            delta.as_secs_f32().min(MAX_DELTA)
        } else {
            self.budget.as_secs_f32()
        };
        self.last_frame_time = started;

        // Driver first, so the view reads this frame's phase
        self.driver.update(dt);
        self.clock += f64::from(dt);
        let report = self.view.frame(dt, self.clock)?;

        let stats = self.end_frame(started, &report);
        if self.config.realtime {
            if let Some(rest) = self.budget.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
        Some(stats)
    }

    /// Runs up to `frames` frames, stopping early on teardown.
    ///
    /// Returns the number of frames actually run.
    pub fn run(&mut self, frames: u64) -> u64 {
        let mut ran = 0;
        while ran < frames && self.tick().is_some() {
            ran += 1;
        }
        ran
    }

    fn end_frame(&mut self, started: Instant, report: &FrameReport) -> FrameStats {
        let stats = FrameStats {
            total_us: started.elapsed().as_micros() as u64,
            step_us: report.step_us,
            paint_us: report.paint_us,
            frame: self.frame_count,
            events_processed: report.events_processed,
            phase: report.phase,
        };
        self.frame_count += 1;
        self.stats_accumulator.record(stats);

        if self.config.enable_timing_logs && stats.total_us > self.budget.as_micros() as u64 * 2 {
            tracing::warn!(
                "Frame {} exceeded budget: {:.2}ms (target: {:.2}ms)",
                self.frame_count,
                stats.total_us as f64 / 1000.0,
                self.budget.as_secs_f64() * 1000.0
            );
        }
        stats
    }

    /// Frames run so far.
    #[inline]
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Seconds on the loop's clock.
    #[must_use]
    pub const fn clock(&self) -> f64 {
        self.clock
    }

    /// The view.
    #[must_use]
    pub const fn view(&self) -> &PortraitView {
        &self.view
    }

    /// The view, mutably (for teardown or hooks).
    pub fn view_mut(&mut self) -> &mut PortraitView {
        &mut self.view
    }

    /// The phase driver, mutably (for restarts).
    pub fn driver_mut(&mut self) -> &mut PhaseDriver {
        &mut self.driver
    }

    /// The phase driver.
    #[must_use]
    pub const fn driver(&self) -> &PhaseDriver {
        &self.driver
    }

    /// Accumulated statistics.
    #[must_use]
    pub const fn stats(&self) -> &FrameStatsAccumulator {
        &self.stats_accumulator
    }

    /// Consumes the loop, returning the view.
    #[must_use]
    pub fn into_view(self) -> PortraitView {
        self.view
    }
}

/// Accumulator for frame statistics.
#[derive(Clone, Debug)]
pub struct FrameStatsAccumulator {
    /// Frame budget frames are measured against.
    pub budget_us: u64,
    /// Total frames recorded.
    pub frames_recorded: u64,
    /// Sum of total frame times.
    pub total_us_sum: u64,
    /// Sum of step times.
    pub step_us_sum: u64,
    /// Sum of paint times.
    pub paint_us_sum: u64,
    /// Min frame time.
    pub min_frame_us: u64,
    /// Max frame time.
    pub max_frame_us: u64,
    /// Frames that exceeded budget.
    pub frames_over_budget: u64,
    /// Input events processed.
    pub events_processed: u64,
}

impl FrameStatsAccumulator {
    /// Creates an accumulator measuring against `budget`.
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self {
            budget_us: budget.as_micros() as u64,
            frames_recorded: 0,
            total_us_sum: 0,
            step_us_sum: 0,
            paint_us_sum: 0,
            min_frame_us: u64::MAX,
            max_frame_us: 0,
            frames_over_budget: 0,
            events_processed: 0,
        }
    }

    /// Records a frame's statistics.
    pub fn record(&mut self, stats: FrameStats) {
        self.frames_recorded += 1;
        self.total_us_sum += stats.total_us;
        self.step_us_sum += stats.step_us;
        self.paint_us_sum += stats.paint_us;
        self.min_frame_us = self.min_frame_us.min(stats.total_us);
        self.max_frame_us = self.max_frame_us.max(stats.total_us);
        self.events_processed += u64::from(stats.events_processed);

        if stats.total_us > self.budget_us {
            self.frames_over_budget += 1;
        }
    }

    /// Returns average frame time in milliseconds.
    #[must_use]
    pub fn avg_frame_ms(&self) -> f64 {
        self.average(self.total_us_sum)
    }

    /// Returns average achievable FPS.
    #[must_use]
    pub fn avg_fps(&self) -> f64 {
        let avg_ms = self.avg_frame_ms();
        if avg_ms <= 0.0 {
            return 0.0;
        }
        1000.0 / avg_ms
    }

    /// Returns the fraction of frames over budget.
    #[must_use]
    pub fn over_budget_ratio(&self) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        self.frames_over_budget as f64 / self.frames_recorded as f64
    }

    /// Logs a summary of the statistics.
    pub fn log_summary(&self) {
        if self.frames_recorded == 0 {
            tracing::info!("No frames recorded");
            return;
        }
        tracing::info!(
            "Frames: {} | avg {:.3}ms ({:.1} fps) | min {:.3}ms | max {:.3}ms",
            self.frames_recorded,
            self.avg_frame_ms(),
            self.avg_fps(),
            self.min_frame_us as f64 / 1000.0,
            self.max_frame_us as f64 / 1000.0
        );
        tracing::info!(
            "Breakdown: step {:.3}ms | paint {:.3}ms | over budget {} ({:.1}%) | events {}",
            self.average(self.step_us_sum),
            self.average(self.paint_us_sum),
            self.frames_over_budget,
            self.over_budget_ratio() * 100.0,
            self.events_processed
        );
    }

    /// Average of a microsecond sum, in milliseconds.
    fn average(&self, sum_us: u64) -> f64 {
        if self.frames_recorded == 0 {
            return 0.0;
        }
        (sum_us as f64 / self.frames_recorded as f64) / 1000.0
    }
}

impl Default for FrameStatsAccumulator {
    fn default() -> Self {
        Self::new(Duration::from_micros(16_666))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LuminaConfig;
    use crate::events::{EventBus, PortraitEvent};
    use crate::view::Container;
    use lumina_core::PhaseCell;
    use lumina_ui::PhaseTimings;

    fn frame_loop() -> (FrameLoop, crate::EventSender) {
        let config = LuminaConfig {
            seed: Some(1),
            particle_count: 60,
            ..LuminaConfig::default()
        };
        let cell = PhaseCell::default();
        let (sender, receiver) = EventBus::new().split();
        let view = PortraitView::mount(Some(Container::new(120, 90)), &config, cell.clone(), receiver)
            .expect("container present");
        let driver = PhaseDriver::new(cell, PhaseTimings::default());
        (FrameLoop::new(view, driver, config.frame), sender)
    }

    #[test]
    fn test_virtual_clock_advances_by_budget() {
        let (mut frame_loop, _) = frame_loop();
        assert_eq!(frame_loop.run(60), 60);
        assert_eq!(frame_loop.frame_count(), 60);
        assert!((frame_loop.clock() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_phase_follows_driver() {
        let (mut frame_loop, _) = frame_loop();
        // Assembling holds for 3.5s at 60fps
        frame_loop.run(200);
        assert_eq!(frame_loop.driver().phase(), Phase::Assembling);
        assert_eq!(frame_loop.tick().map(|s| s.phase), Some(Phase::Assembling));
        frame_loop.run(20);
        assert_eq!(frame_loop.tick().map(|s| s.phase), Some(Phase::Holding));
    }

    #[test]
    fn test_teardown_stops_run() {
        let (mut frame_loop, sender) = frame_loop();
        frame_loop.run(3);
        sender.send(PortraitEvent::Teardown);
        assert_eq!(frame_loop.run(10), 0);
        assert_eq!(frame_loop.frame_count(), 3);
    }

    #[test]
    fn test_stats_accumulator() {
        let mut acc = FrameStatsAccumulator::default();

        for i in 0..100 {
            acc.record(FrameStats {
                total_us: 10_000 + (i * 100),
                step_us: 5000,
                paint_us: 2000,
                frame: i,
                events_processed: 1,
                phase: Phase::Holding,
            });
        }

        assert_eq!(acc.frames_recorded, 100);
        assert_eq!(acc.events_processed, 100);
        assert!(acc.avg_fps() > 50.0);
        assert!(acc.avg_fps() < 100.0);
        assert_eq!(acc.frames_over_budget, 33);
    }
}
