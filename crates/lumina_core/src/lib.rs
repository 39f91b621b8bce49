//! # LUMINA Core
//!
//! Plain data shared by every LUMINA crate:
//! - [`Particle`] and the face [`Region`] its target belongs to
//! - [`Vec2`] (`f64` surface pixels) and [`Color`]
//! - [`Phase`] and the [`PhaseCell`] the driver writes and the simulator reads
//!
//! ## Example
//!
//! ```rust
//! use lumina_core::{Phase, PhaseCell};
//!
//! let cell = PhaseCell::new(Phase::Assembling);
//! let reader = cell.clone();
//! cell.set(Phase::Holding);
//! assert_eq!(reader.get(), Phase::Holding);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod color;
pub mod math;
pub mod particle;
pub mod phase;
pub mod sync;

pub use color::Color;
pub use math::Vec2;
pub use particle::{Particle, Region};
pub use phase::Phase;
pub use sync::PhaseCell;
