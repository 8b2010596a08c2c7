//! Game Module
//!
//! Stacking gameplay built on top of the engine: placed solids, height
//! tracking, timed rounds, wind and the session that ties them together.

pub mod builder;
pub mod config;
pub mod render;
pub mod state;
pub mod systems;
pub mod types;

pub use builder::{GhostPreview, ToolConfig, ghost_preview};
pub use config::{ConfigError, Preferences, SandboxConfig};
pub use render::{EntityInstance, extract_instances, instance_bytes};
pub use state::{FrameReport, RoundSnapshot, StackSession};
pub use systems::{
    BodyRegistry, EntitySystem, HeightTracker, RoundDurations, RoundMode, RoundOutcome,
    RoundPhase, RoundSystem, SpawnConfig, SpawnError, WindConfig, WindGust, WindSystem,
};
pub use types::{Entity, EntityId, PALETTE, ShapeKind, SizeSpec};
