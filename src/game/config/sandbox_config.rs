//! Sandbox Configuration
//!
//! Every tunable of a stacking session in one serde tree. Each section
//! defaults independently, so a config file only needs the fields it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::game::builder::ToolConfig;
use crate::game::systems::{RoundDurations, SpawnConfig, WindConfig};
use crate::physics::PhysicsConfig;
use crate::world::GridConfig;

/// Central configuration for a stacking session.
///
/// `Default` returns the documented gameplay constants: 0.5 m grid,
/// drops from 6 m, 60 s / 45 s rounds, 6 N·s gusts every 900 ms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub grid: GridConfig,
    pub spawn: SpawnConfig,
    pub rounds: RoundDurations,
    pub wind: WindConfig,
    pub physics: PhysicsConfig,
    /// Tool state at session start
    pub tool: ToolConfig,
}

impl SandboxConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
