//! Player Preferences
//!
//! Small key-value state the UI keeps between launches. The session core
//! never reads it; hosts load it at startup and save it on change.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::game::types::PALETTE;

/// Longest nickname kept, in characters
pub const NICKNAME_MAX_CHARS: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub zoom: f32,
    pub camera_distance: f32,
    pub nickname: String,
    /// Palette index
    pub color_index: usize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            camera_distance: 18.0,
            nickname: String::new(),
            color_index: 0,
        }
    }
}

impl Preferences {
    /// Load from a JSON file. A missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let mut prefs: Self = serde_json::from_str(&data)?;
        let nickname = std::mem::take(&mut prefs.nickname);
        prefs.set_nickname(&nickname);
        prefs.color_index %= PALETTE.len();
        Ok(prefs)
    }

    /// Write as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, json).map_err(io_err)?;
        Ok(())
    }

    /// Trimmed, at most [`NICKNAME_MAX_CHARS`] characters
    pub fn set_nickname(&mut self, nickname: &str) {
        self.nickname = nickname.trim().chars().take(NICKNAME_MAX_CHARS).collect();
    }

    pub fn has_nickname(&self) -> bool {
        !self.nickname.is_empty()
    }
}
