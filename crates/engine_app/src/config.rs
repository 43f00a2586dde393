//! Engine configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```json
//! { "frame": { "frame_rate": 30.0, "max_frames": 120 },
//!   "manager": { "replace_policy": "release" } }
//! ```

use std::path::Path;

use engine_component::ReplacePolicy;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Pacing of the frame loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Target frames per second.
    pub frame_rate: f64,
    /// Maximum number of frames to run (0 = unlimited).
    pub max_frames: u64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            max_frames: 0,
        }
    }
}

/// Settings applied by the object manager to every object it generates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// What to do with a component displaced by one of the same kind.
    pub replace_policy: ReplacePolicy,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frame loop pacing.
    pub frame: FrameConfig,
    /// Object manager settings.
    pub manager: ManagerConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Parse`] on malformed JSON and
    /// [`EngineError::InvalidFrameRate`] if validation fails.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] if the file cannot be read, otherwise the
    /// errors of [`EngineConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check values serde cannot rule out.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidFrameRate`] unless the frame rate is
    /// finite and positive.
    pub fn validate(&self) -> Result<(), EngineError> {
        let rate = self.frame.frame_rate;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(EngineError::InvalidFrameRate(rate));
        }
        Ok(())
    }
}
