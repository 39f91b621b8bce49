//! # LUMINA
//!
//! An animated particle portrait: a few thousand points drift from a random
//! scatter into a face, hover, melt, fly apart and reassemble.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐  PhaseCell  ┌───────────────────────────────────────┐
//! │  PhaseDriver  │────────────>│             PortraitView              │
//! │  (lumina_ui)  │             │  ┌──────────────┐   ┌──────────────┐  │
//! └───────────────┘             │  │ParticleField │──>│   Surface    │  │
//!                               │  │ (simulator)  │   │ (rendering)  │  │
//! ┌───────────────┐  EventBus   │  └──────────────┘   └──────────────┘  │
//! │ page listeners│────────────>│        ^ FaceGenerator (procedural)   │
//! └───────────────┘             └───────────────────────────────────────┘
//!                                          ^ owned by FrameLoop
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lumina::{Container, EventBus, FrameLoop, LuminaConfig, PortraitView};
//! use lumina_core::PhaseCell;
//! use lumina_ui::PhaseDriver;
//!
//! let config = LuminaConfig { seed: Some(1), particle_count: 200, ..LuminaConfig::default() };
//! let phase = PhaseCell::default();
//! let (listener, receiver) = EventBus::new().split();
//!
//! let view = PortraitView::mount(Some(Container::new(320, 240)), &config, phase.clone(), receiver)
//!     .expect("container present");
//! let driver = PhaseDriver::new(phase, config.timings);
//! let mut frame_loop = FrameLoop::new(view, driver, config.frame);
//!
//! listener.pointer_moved(160.0, 120.0);
//! assert_eq!(frame_loop.run(30), 30);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod events;
pub mod frame_loop;
pub mod simulator;
pub mod snapshot;
pub mod view;

pub use config::{FrameConfig, LuminaConfig, SurfaceConfig};
pub use error::{LuminaError, LuminaResult};
pub use events::{EventBus, EventReceiver, EventSender, PortraitEvent};
pub use frame_loop::{FrameLoop, FrameStats, FrameStatsAccumulator};
pub use simulator::{ParticleField, StepStats};
pub use view::{Container, FrameReport, PortraitView};
