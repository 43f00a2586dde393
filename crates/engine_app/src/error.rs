//! Error types for loading and validating engine configuration.
//!
//! The object/component core itself never fails: lookups miss with empty
//! handles and removals of absent components are no-ops.

use std::path::PathBuf;

/// Errors raised while preparing an engine run.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The frame rate must be a finite, positive number.
    #[error("invalid frame rate: {0}")]
    InvalidFrameRate(f64),
}
