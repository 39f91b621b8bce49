//! # Phase Hand-off Between Driver and Simulator
//!
//! ```text
//! Driver (timer):      WRITE current phase
//! Simulator (frame):   READ current phase, every frame
//! ```
//!
//! The driver only ever writes one value. A single atomic is enough: the
//! simulator never caches the phase, so the next frame sees the change.

mod phase_cell;

pub use phase_cell::PhaseCell;
