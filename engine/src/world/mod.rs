//! World Module
//!
//! World-space placement utilities: the snapping grid and table bounds.

pub mod grid;

pub use grid::{DEFAULT_GRID_UNIT, DEFAULT_PLAY_AREA, GridConfig, clamp_to_map, snap_to_grid};
