//! Config Module
//!
//! Session configuration and player preferences, both stored as JSON.

pub mod preferences;
pub mod sandbox_config;

use std::path::PathBuf;

use thiserror::Error;

pub use preferences::{NICKNAME_MAX_CHARS, Preferences};
pub use sandbox_config::SandboxConfig;

/// Failure reading or writing a config or preferences file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
