//! Grid Configuration Module
//!
//! Placement grid for the stacking table. Pointer rays hit the ground plane
//! at arbitrary precision; drops and previews use the snapped point so that
//! what the player sees hovering is exactly where the solid falls.
//!
//! - 1 unit = 1 meter (SI units)
//! - Only X and Z snap; Y passes through untouched

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Default grid cell size
pub const DEFAULT_GRID_UNIT: f32 = 0.5;

/// Default half-size of the play area (the table spans -20..20 on X and Z)
pub const DEFAULT_PLAY_AREA: f32 = 20.0;

/// Snap a position to the nearest grid point.
///
/// X and Z are rounded to the nearest multiple of `grid_size`; Y is preserved.
pub fn snap_to_grid(position: Vec3, grid_size: f32) -> Vec3 {
    if grid_size <= 0.0 || !grid_size.is_finite() {
        return position;
    }
    Vec3::new(
        (position.x / grid_size).round() * grid_size,
        position.y,
        (position.z / grid_size).round() * grid_size,
    )
}

/// Clamp a position to a square play area centered on the origin.
///
/// Clamps X and Z to [-half_size, +half_size]; Y is preserved.
pub fn clamp_to_map(position: Vec3, half_size: f32) -> Vec3 {
    Vec3::new(
        position.x.clamp(-half_size, half_size),
        position.y,
        position.z.clamp(-half_size, half_size),
    )
}

/// Placement grid settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Grid cell size
    pub unit: f32,
    /// Play area bounds (-play_area to +play_area)
    pub play_area: f32,
    /// Grid snapping on/off
    pub snap_enabled: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            unit: DEFAULT_GRID_UNIT,
            play_area: DEFAULT_PLAY_AREA,
            snap_enabled: true,
        }
    }
}

impl GridConfig {
    pub fn new(unit: f32, play_area: f32) -> Self {
        Self {
            unit,
            play_area,
            snap_enabled: true,
        }
    }

    /// Snap a position to the grid if snapping is enabled.
    pub fn snap_to_grid(&self, pos: Vec3) -> Vec3 {
        if !self.snap_enabled {
            return pos;
        }
        snap_to_grid(pos, self.unit)
    }

    /// Snap and clamp a position in one operation.
    ///
    /// Clamping happens after snapping, so a point past the edge lands on
    /// the boundary rather than one cell beyond it.
    pub fn snap_and_clamp(&self, pos: Vec3) -> Vec3 {
        clamp_to_map(self.snap_to_grid(pos), self.play_area)
    }
}
