//! # Configuration
//!
//! All tunables live in one TOML file, loaded once at startup:
//!
//! ```toml
//! seed = 42
//! particle_count = 2500
//! reduced_particle_count = 800
//! reduced_motion = false
//!
//! [surface]
//! width = 640
//! height = 480
//!
//! [timings]
//! assembling = 3.5
//! holding = 4.0
//!
//! [frame]
//! target_fps = 60
//! ```
//!
//! Every key is optional; missing keys take the defaults below.

use std::path::Path;

use lumina_ui::PhaseTimings;
use serde::{Deserialize, Serialize};

use crate::error::{LuminaError, LuminaResult};

/// Upper bound on particles per generation.
pub const MAX_PARTICLES: usize = 100_000;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LuminaConfig {
    /// Fixed generator seed. `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Particles per generation.
    pub particle_count: usize,
    /// Particles per generation when reduced motion is requested.
    pub reduced_particle_count: usize,
    /// Initial reduced-motion preference.
    pub reduced_motion: bool,
    /// Initial surface geometry.
    pub surface: SurfaceConfig,
    /// Phase hold times.
    pub timings: PhaseTimings,
    /// Frame loop settings.
    pub frame: FrameConfig,
}

impl LuminaConfig {
    /// Parses a configuration from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`LuminaError::ConfigParse`] for malformed TOML and
    /// [`LuminaError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> LuminaResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`LuminaError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> LuminaResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| LuminaError::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`LuminaError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> LuminaResult<()> {
        for (name, count) in [
            ("particle_count", self.particle_count),
            ("reduced_particle_count", self.reduced_particle_count),
        ] {
            if count == 0 || count > MAX_PARTICLES {
                return Err(LuminaError::InvalidConfig(format!(
                    "{name} must be in 1..={MAX_PARTICLES}, got {count}"
                )));
            }
        }

        for (name, seconds) in self.timings.entries() {
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(LuminaError::InvalidConfig(format!(
                    "timings.{name} must be a non-negative number of seconds, got {seconds}"
                )));
            }
        }
        if self.timings.cycle() <= 0.0 {
            return Err(LuminaError::InvalidConfig(
                "phase timings must not all be zero".to_owned(),
            ));
        }

        if !(self.surface.origin_x.is_finite() && self.surface.origin_y.is_finite()) {
            return Err(LuminaError::InvalidConfig(
                "surface origin must be finite".to_owned(),
            ));
        }

        if self.frame.target_fps == 0 || self.frame.target_fps > 1000 {
            return Err(LuminaError::InvalidConfig(format!(
                "frame.target_fps must be in 1..=1000, got {}",
                self.frame.target_fps
            )));
        }
        Ok(())
    }
}

impl Default for LuminaConfig {
    fn default() -> Self {
        Self {
            seed: None,
            particle_count: 2500,
            reduced_particle_count: 800,
            reduced_motion: false,
            surface: SurfaceConfig::default(),
            timings: PhaseTimings::default(),
            frame: FrameConfig::default(),
        }
    }
}

/// Initial surface geometry, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Surface left edge in client space.
    pub origin_x: f64,
    /// Surface top edge in client space.
    pub origin_y: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

/// Frame loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Target frames per second.
    pub target_fps: u32,
    /// Log frames that exceed the budget.
    pub enable_timing_logs: bool,
    /// Sleep to the frame budget instead of running on a virtual clock.
    pub realtime: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            enable_timing_logs: false,
            realtime: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LuminaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.particle_count, 2500);
        assert_eq!(config.reduced_particle_count, 800);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = LuminaConfig::from_toml_str(
            r"
            seed = 7
            reduced_motion = true

            [timings]
            holding = 6.0

            [surface]
            width = 200
            ",
        )
        .unwrap();

        assert_eq!(config.seed, Some(7));
        assert!(config.reduced_motion);
        assert!((config.timings.holding - 6.0).abs() < f32::EPSILON);
        assert!((config.timings.assembling - 3.5).abs() < f32::EPSILON);
        assert_eq!(config.surface.width, 200);
        assert_eq!(config.surface.height, 480);
        assert_eq!(config.frame.target_fps, 60);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(LuminaConfig::from_toml_str("").unwrap(), LuminaConfig::default());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = LuminaConfig::from_toml_str("particle_count = [").unwrap_err();
        assert!(matches!(err, LuminaError::ConfigParse(_)));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let err = LuminaConfig::from_toml_str("particle_count = \"many\"").unwrap_err();
        assert!(matches!(err, LuminaError::ConfigParse(_)));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for text in [
            "particle_count = 0",
            "reduced_particle_count = 1000000",
            "[timings]\nliquid = -1.0",
            "[timings]\nassembling = nan",
            "[timings]\nassembling = 0.0\nholding = 0.0\nliquid = 0.0\ndispersing = 0.0",
            "[frame]\ntarget_fps = 0",
            "[surface]\norigin_x = inf",
        ] {
            let err = LuminaConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, LuminaError::InvalidConfig(_)), "{text}: {err}");
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = LuminaConfig::load("/nonexistent/lumina.toml").unwrap_err();
        assert!(matches!(err, LuminaError::Io { .. }));
        assert!(err.to_string().contains("lumina.toml"));
    }
}
