//! Builder Tools
//!
//! Current tool state for dropping solids: shape, size and color.

use serde::{Deserialize, Serialize};

use crate::game::types::{PALETTE, ShapeKind, SizeSpec};

/// Footprint size bounds (meters)
pub const FOOTPRINT_RANGE: (f32, f32) = (0.5, 3.0);

/// Thickness bounds (meters)
pub const THICKNESS_RANGE: (f32, f32) = (0.2, 2.0);

pub const DEFAULT_FOOTPRINT: f32 = 1.4;
pub const DEFAULT_THICKNESS: f32 = 0.9;

/// Selected shape, size and color for the next drop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub shape: ShapeKind,
    pub footprint: f32,
    pub thickness: f32,
    /// Palette index
    pub color_index: usize,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Box,
            footprint: DEFAULT_FOOTPRINT,
            thickness: DEFAULT_THICKNESS,
            color_index: 0,
        }
    }
}

impl ToolConfig {
    /// Copy with every value pulled into bounds
    pub fn sanitized(mut self) -> Self {
        let (footprint, thickness, color) = (self.footprint, self.thickness, self.color_index);
        self.footprint = DEFAULT_FOOTPRINT;
        self.thickness = DEFAULT_THICKNESS;
        self.set_footprint(footprint);
        self.set_thickness(thickness);
        self.set_color(color);
        self
    }

    pub fn set_shape(&mut self, shape: ShapeKind) {
        self.shape = shape;
    }

    /// Select the next shape in toolbar order
    pub fn cycle_shape(&mut self) -> ShapeKind {
        self.shape = self.shape.next();
        self.shape
    }

    /// Clamp into [`FOOTPRINT_RANGE`]; NaN keeps the current value.
    pub fn set_footprint(&mut self, footprint: f32) {
        if footprint.is_finite() {
            self.footprint = footprint.clamp(FOOTPRINT_RANGE.0, FOOTPRINT_RANGE.1);
        }
    }

    /// Clamp into [`THICKNESS_RANGE`]; NaN keeps the current value.
    pub fn set_thickness(&mut self, thickness: f32) {
        if thickness.is_finite() {
            self.thickness = thickness.clamp(THICKNESS_RANGE.0, THICKNESS_RANGE.1);
        }
    }

    /// Palette index, wrapped into the palette
    pub fn set_color(&mut self, index: usize) {
        self.color_index = index % PALETTE.len();
    }

    pub fn size(&self) -> SizeSpec {
        SizeSpec::new(self.footprint, self.thickness)
    }
}
