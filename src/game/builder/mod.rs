//! Builder Module
//!
//! Tool state and placement preview for dropping solids.

pub mod placement;
pub mod tools;

pub use placement::{GhostPreview, ghost_preview};
pub use tools::{
    DEFAULT_FOOTPRINT, DEFAULT_THICKNESS, FOOTPRINT_RANGE, THICKNESS_RANGE, ToolConfig,
};
