//! # LUMINA UI
//!
//! The parts of the portrait that face the page around it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  set()   ┌───────────┐  get() each frame  ┌───────────┐
//! │ PhaseDriver  │─────────>│ PhaseCell │───────────────────>│ Simulator │
//! │ (timer)      │          └───────────┘                    └───────────┘
//! └──────────────┘
//! pointer move ──> PointerState (client → surface-local) ──> Simulator
//! ```
//!
//! The driver never reads anything back from the simulator.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod input;
pub mod phase;

pub use animation::{ease_standard, Animation};
pub use input::PointerState;
pub use phase::{PhaseDriver, PhaseTimings};
