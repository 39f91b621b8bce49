//! # Phase Driver
//!
//! Timed state machine cycling the portrait through its four phases.
//!
//! ## Timeline
//!
//! ```text
//! assembling ──3.5s──> holding ──4s──> liquid ──4s──> dispersing ──2s──┐
//!     ^                                                                 │
//!     └─────────────────────────────────────────────────────────────────┘
//!
//! restart(): ──> dispersing (now) ──1s──> assembling
//! ```
//!
//! The driver owns timing only. Its single output is the shared
//! [`PhaseCell`]; it reads nothing back from the simulator.

use lumina_core::{Phase, PhaseCell};
use serde::{Deserialize, Serialize};

/// Upper bound on transitions taken in one `update`, so a zero-length phase
/// configuration cannot spin forever.
const MAX_TRANSITIONS_PER_UPDATE: usize = 8;

/// How long each phase is held, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseTimings {
    /// Assembling → holding.
    pub assembling: f32,
    /// Holding → liquid.
    pub holding: f32,
    /// Liquid → dispersing.
    pub liquid: f32,
    /// Dispersing → assembling.
    pub dispersing: f32,
    /// Dispersing → assembling after a manual restart.
    pub restart_dispersing: f32,
}

impl PhaseTimings {
    /// Hold time for `phase` in the regular cycle.
    #[must_use]
    pub const fn hold(&self, phase: Phase) -> f32 {
        match phase {
            Phase::Assembling => self.assembling,
            Phase::Holding => self.holding,
            Phase::Liquid => self.liquid,
            Phase::Dispersing => self.dispersing,
        }
    }

    /// Length of one full cycle.
    #[must_use]
    pub fn cycle(&self) -> f32 {
        self.assembling + self.holding + self.liquid + self.dispersing
    }

    /// Returns every timing, labelled, for validation.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, f32); 5] {
        [
            ("assembling", self.assembling),
            ("holding", self.holding),
            ("liquid", self.liquid),
            ("dispersing", self.dispersing),
            ("restart_dispersing", self.restart_dispersing),
        ]
    }
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self {
            assembling: 3.5,
            holding: 4.0,
            liquid: 4.0,
            dispersing: 2.0,
            restart_dispersing: 1.0,
        }
    }
}

/// The phase state machine.
#[derive(Debug)]
pub struct PhaseDriver {
    /// Shared output.
    cell: PhaseCell,
    /// Configuration.
    timings: PhaseTimings,
    /// Current phase (mirrors the cell).
    phase: Phase,
    /// Seconds spent in the current phase.
    elapsed: f32,
    /// Seconds the current phase is held for.
    hold: f32,
    /// Transitions taken so far.
    transitions: u64,
}

impl PhaseDriver {
    /// Creates a driver starting in assembling and publishes that phase.
    #[must_use]
    pub fn new(cell: PhaseCell, timings: PhaseTimings) -> Self {
        cell.set(Phase::Assembling);
        Self {
            cell,
            timings,
            phase: Phase::Assembling,
            elapsed: 0.0,
            hold: timings.hold(Phase::Assembling),
            transitions: 0,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds spent in the current phase.
    #[must_use]
    pub const fn elapsed_in_phase(&self) -> f32 {
        self.elapsed
    }

    /// Seconds until the next scheduled transition.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        (self.hold - self.elapsed).max(0.0)
    }

    /// Transitions taken so far.
    #[must_use]
    pub const fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Timings in use.
    #[must_use]
    pub const fn timings(&self) -> &PhaseTimings {
        &self.timings
    }

    /// A handle on the shared cell this driver writes.
    #[must_use]
    pub fn cell(&self) -> PhaseCell {
        self.cell.clone()
    }

    /// Advances the timer by `dt` seconds.
    ///
    /// Returns the new phase if at least one transition happened. Time left
    /// over after a transition carries into the next phase, so a coarse
    /// clock still follows the nominal timeline.
    pub fn update(&mut self, dt: f32) -> Option<Phase> {
        if !dt.is_finite() || dt <= 0.0 {
            return None;
        }
        self.elapsed += dt;

        let mut changed = None;
        for _ in 0..MAX_TRANSITIONS_PER_UPDATE {
            if self.elapsed < self.hold {
                break;
            }
            let carry = self.elapsed - self.hold;
            let next = self.phase.next();
            self.transition_to(next, self.timings.hold(next));
            self.elapsed = carry;
            changed = Some(next);
        }
        changed
    }

    /// Manual restart: disperse now, reassemble after the restart delay.
    pub fn restart(&mut self) {
        tracing::info!("Phase restart requested in {}", self.phase);
        self.transition_to(Phase::Dispersing, self.timings.restart_dispersing);
    }

    fn transition_to(&mut self, next: Phase, hold: f32) {
        let previous = self.phase;
        self.phase = next;
        self.elapsed = 0.0;
        self.hold = hold;
        self.transitions += 1;
        self.cell.set(next);

        tracing::info!(
            "Phase transition: {} -> {} (hold {:.1}s, #{})",
            previous,
            next,
            hold,
            self.transitions
        );
    }
}
