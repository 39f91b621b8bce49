//! # LUMINA Rendering
//!
//! CPU rasterizer for the particle portrait.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐    ┌──────────────────┐    ┌──────────────────────────┐
//! │ Particles│───>│ ParticlePainter  │───>│ Surface (premultiplied)  │
//! └──────────┘    │ square or disc   │    └────────────┬─────────────┘
//!                 └──────────────────┘                 │ present(effect)
//!                                                      ▼
//!                                        ┌──────────────────────────┐
//!                                        │ Frame (RGBA8, blur/alpha)│
//!                                        └──────────────────────────┘
//! ```
//!
//! The host copies [`Frame::as_bytes`] into whatever it displays with.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod effect;
pub mod painter;
pub mod surface;

pub use effect::SurfaceEffect;
pub use painter::{PaintStats, ParticlePainter, ParticleShape};
pub use surface::{Frame, Surface};
