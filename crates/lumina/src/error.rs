//! # LUMINA Error Types
//!
//! The animation itself cannot fail. These cover the edges around it:
//! reading the configuration and writing frame snapshots.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur outside the frame step.
#[derive(Error, Debug)]
pub enum LuminaError {
    /// Reading or writing a file failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`LuminaConfig`](crate::LuminaConfig).
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl LuminaError {
    /// Wraps an I/O error with the path it happened on.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for LUMINA operations.
pub type LuminaResult<T> = Result<T, LuminaError>;
