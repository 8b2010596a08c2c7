//! Physics types
//!
//! Core math types re-exported from glam, plus the body description the
//! gameplay layer hands to a physics world when it spawns a solid.

pub use glam::Vec3;

/// Collision shape of a simulated body.
///
/// Dimensions are full sizes except where noted; the world approximates
/// every shape with its axis-aligned bounding box for contacts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    /// Rectangular prism with half-extents (half-width, half-height, half-depth)
    Box { half_extents: Vec3 },
    /// Upright cylinder
    Cylinder { radius: f32, height: f32 },
    /// Upright equilateral triangular prism; `radius` is the circumradius
    Prism { radius: f32, height: f32 },
}

impl BodyShape {
    /// Half-extents of the shape's bounding box, centered on the body origin.
    ///
    /// The prism's footprint is not centered on its origin, so the box uses
    /// the larger of its two Z reaches on both sides.
    pub fn half_extents(&self) -> Vec3 {
        match *self {
            BodyShape::Box { half_extents } => half_extents,
            BodyShape::Cylinder { radius, height } => Vec3::new(radius, height * 0.5, radius),
            BodyShape::Prism { radius, height } => {
                Vec3::new(radius * 3f32.sqrt() * 0.5, height * 0.5, radius)
            }
        }
    }

    /// Full height along the up axis.
    pub fn height(&self) -> f32 {
        self.half_extents().y * 2.0
    }

    /// True when every dimension is finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        let he = self.half_extents();
        [he.x, he.y, he.z].iter().all(|v| v.is_finite() && *v > 0.0)
    }
}

/// Everything a physics world needs to create one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    /// Mass in kg
    pub mass: f32,
    /// Initial center position in world space
    pub position: Vec3,
    pub shape: BodyShape,
}
