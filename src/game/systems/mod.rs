//! Game systems — self-contained modules that own state and logic.

pub mod body_registry;
pub mod entity_system;
pub mod height_tracker;
pub mod round_system;
pub mod wind_system;

pub use body_registry::BodyRegistry;
pub use entity_system::{EntitySystem, SpawnConfig, SpawnError};
pub use height_tracker::HeightTracker;
pub use round_system::{RoundDurations, RoundMode, RoundOutcome, RoundPhase, RoundSystem};
pub use wind_system::{
    WIND_INTERVAL_RANGE_MS, WIND_STRENGTH_RANGE, WindConfig, WindGust, WindSystem,
};
