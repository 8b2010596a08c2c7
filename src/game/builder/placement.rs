//! Placement Preview
//!
//! Ghost descriptor for the pending drop. Pure data for the renderer: it is
//! never registered with physics and never receives an entity id.

use glam::Vec3;

use crate::game::builder::ToolConfig;
use crate::game::types::{ShapeKind, SizeSpec};
use crate::physics::BodyShape;

/// Transient description of where the next solid would land
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostPreview {
    pub shape: ShapeKind,
    pub size: SizeSpec,
    /// Collision dimensions the real solid would get
    pub dims: BodyShape,
    /// Center, resting on the hover plane
    pub position: Vec3,
    /// Palette index
    pub color: usize,
}

/// Build the ghost for a hover point, or `None` when nothing is hovered.
///
/// # Arguments
/// * `hover` - Snapped hover point on the ground plane
/// * `tool` - Current shape, size and color
pub fn ghost_preview(hover: Option<Vec3>, tool: &ToolConfig) -> Option<GhostPreview> {
    let hover = hover?;
    let size = tool.size();
    Some(GhostPreview {
        shape: tool.shape,
        size,
        dims: tool.shape.body_shape(size),
        position: Vec3::new(hover.x, hover.y + size.vertical_extent() * 0.5, hover.z),
        color: tool.color_index,
    })
}
