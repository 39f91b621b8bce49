//! Lock-free shared phase value.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::phase::Phase;

/// Shared storage for the current phase.
///
/// Cloning is cheap; all clones observe the same value.
#[derive(Clone, Debug)]
pub struct PhaseCell {
    phase: Arc<AtomicU8>,
}

impl PhaseCell {
    /// Creates a cell holding `phase`.
    #[must_use]
    pub fn new(phase: Phase) -> Self {
        Self {
            phase: Arc::new(AtomicU8::new(phase.as_u8())),
        }
    }

    /// Reads the current phase.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Phase {
        // Only `set` writes here, and it only stores valid tags.
        Phase::from_u8(self.phase.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Stores a new phase. Returns true if the value changed.
    pub fn set(&self, phase: Phase) -> bool {
        self.phase.swap(phase.as_u8(), Ordering::AcqRel) != phase.as_u8()
    }
}

impl Default for PhaseCell {
    fn default() -> Self {
        Self::new(Phase::default())
    }
}
