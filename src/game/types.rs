//! Game Types
//!
//! Shared gameplay data: entity identifiers, the three stackable shapes,
//! size descriptors, the color palette and the placed entity record.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::physics::BodyShape;

/// Identifier of a placed solid. Assigned once, never reused.
pub type EntityId = u32;

/// Shape names for display
pub const SHAPE_NAMES: [&str; 3] = ["Box", "Cylinder", "Prism"];

/// Predefined colors for placed solids
pub const PALETTE: [(u8, u8, u8); 8] = [
    (255, 100, 50),  // Orange
    (50, 200, 255),  // Cyan
    (255, 50, 150),  // Pink
    (150, 255, 50),  // Lime
    (255, 200, 50),  // Yellow
    (150, 50, 255),  // Purple
    (50, 255, 150),  // Mint
    (255, 150, 200), // Light pink
];

/// Pack RGB color components into a single u32 value
/// Format: 0x00RRGGBB
#[inline]
pub fn pack_color(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Palette color for an index; out-of-range indices wrap around.
#[inline]
pub fn palette_color(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

/// Circumradius of an equilateral triangle with the given side length.
#[inline]
pub fn prism_radius(side: f32) -> f32 {
    side / 3f32.sqrt()
}

/// The closed set of solids a player can drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Rectangular prism, square footprint
    #[default]
    Box,
    /// Upright cylinder
    Cylinder,
    /// Upright equilateral triangular prism
    Prism,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Box, ShapeKind::Cylinder, ShapeKind::Prism];

    pub fn index(self) -> usize {
        match self {
            ShapeKind::Box => 0,
            ShapeKind::Cylinder => 1,
            ShapeKind::Prism => 2,
        }
    }

    pub fn name(self) -> &'static str {
        SHAPE_NAMES[self.index()]
    }

    /// Next shape in toolbar order, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Collision/render dimensions for this shape at the given size.
    ///
    /// - Box: `size × thickness × size`
    /// - Cylinder: radius `size / 2`, height `thickness`
    /// - Prism: circumradius `size / √3`, height `thickness`
    pub fn body_shape(self, size: SizeSpec) -> BodyShape {
        match self {
            ShapeKind::Box => BodyShape::Box {
                half_extents: Vec3::new(size.footprint, size.thickness, size.footprint) * 0.5,
            },
            ShapeKind::Cylinder => BodyShape::Cylinder {
                radius: size.footprint * 0.5,
                height: size.thickness,
            },
            ShapeKind::Prism => BodyShape::Prism {
                radius: prism_radius(size.footprint),
                height: size.thickness,
            },
        }
    }
}

/// Size of a solid: footprint extent and thickness (height)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeSpec {
    pub footprint: f32,
    pub thickness: f32,
}

impl SizeSpec {
    pub fn new(footprint: f32, thickness: f32) -> Self {
        Self { footprint, thickness }
    }

    /// Extent along the up axis, the same for every shape
    pub fn vertical_extent(&self) -> f32 {
        self.thickness
    }
}

/// A placed solid
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Unique identifier
    pub id: EntityId,
    pub shape: ShapeKind,
    pub size: SizeSpec,
    /// Palette index
    pub color: usize,
    /// Where the solid was spawned (above the table)
    pub spawn_position: Vec3,
    /// Current center, updated from the physics world every step
    pub position: Vec3,
    /// Has come to rest at least once; only settled solids count for height
    pub settled: bool,
}

impl Entity {
    /// Highest point of the solid at its current position
    pub fn top_height(&self) -> f32 {
        self.position.y + self.size.vertical_extent() * 0.5
    }

    pub fn body_shape(&self) -> BodyShape {
        self.shape.body_shape(self.size)
    }

    /// Packed 0x00RRGGBB color
    pub fn color_packed(&self) -> u32 {
        let (r, g, b) = palette_color(self.color);
        pack_color(r, g, b)
    }
}
