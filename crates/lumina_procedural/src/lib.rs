//! # LUMINA Procedural Generation
//!
//! Deterministic face-shaped particle layouts.
//!
//! ## Design Principles
//!
//! 1. **Pure**: a layout is a function of `(count, width, height, rng)`
//! 2. **Deterministic**: same [`PortraitSeed`] always produces the same portrait
//! 3. **Disposable**: layouts are in absolute surface pixels, so a resize
//!    throws the whole set away and generates a new one
//!
//! ## Example
//!
//! ```rust
//! use lumina_procedural::{FaceGenerator, PortraitSeed};
//!
//! let mut generator = FaceGenerator::new(PortraitSeed::new(7));
//! let particles = generator.generate(2500, 640.0, 480.0);
//! assert_eq!(particles.len(), 2500);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod face;
pub mod seed;

pub use face::{generate_face_points, FaceGenerator, FaceLayout};
pub use seed::PortraitSeed;
