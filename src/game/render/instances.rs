//! Entity instances for GPU upload
//!
//! One `EntityInstance` per placed solid, laid out for a vertex/storage
//! buffer. The renderer scales a unit mesh per shape tag.
//!
//! Memory layout (32 bytes, 16-byte aligned rows):
//!   offset 0:  position (vec3<f32>)
//!   offset 12: shape (u32) - 0=Box, 1=Cylinder, 2=Prism
//!   offset 16: dims (vec3<f32>) - footprint, thickness, footprint
//!   offset 28: color (u32) - packed 0x00RRGGBB

use crate::game::builder::GhostPreview;
use crate::game::types::{Entity, ShapeKind, SizeSpec, palette_color, pack_color};
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct EntityInstance {
    // Row 0: position + shape tag = 16 bytes
    pub position: [f32; 3],
    pub shape: u32,

    // Row 1: dims + packed color = 16 bytes
    pub dims: [f32; 3],
    pub color: u32,
}

static_assertions::assert_eq_size!(EntityInstance, [u8; 32]);

impl EntityInstance {
    pub fn new(position: Vec3, shape: ShapeKind, size: SizeSpec, color: u32) -> Self {
        Self {
            position: position.to_array(),
            shape: shape.index() as u32,
            dims: [size.footprint, size.thickness, size.footprint],
            color,
        }
    }

    pub fn from_entity(entity: &Entity) -> Self {
        Self::new(entity.position, entity.shape, entity.size, entity.color_packed())
    }

    pub fn from_ghost(ghost: &GhostPreview) -> Self {
        let (r, g, b) = palette_color(ghost.color);
        Self::new(ghost.position, ghost.shape, ghost.size, pack_color(r, g, b))
    }
}

/// Instances for every placed solid, in draw order
pub fn extract_instances<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> Vec<EntityInstance> {
    entities.into_iter().map(EntityInstance::from_entity).collect()
}

/// Raw bytes ready for a buffer write
pub fn instance_bytes(instances: &[EntityInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: u32, shape: ShapeKind, color: usize) -> Entity {
        Entity {
            id,
            shape,
            size: SizeSpec::new(1.4, 0.9),
            color,
            spawn_position: Vec3::new(1.0, 6.0, 2.0),
            position: Vec3::new(1.0, 0.45, 2.0),
            settled: true,
        }
    }

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<EntityInstance>(), 32);
        assert_eq!(std::mem::align_of::<EntityInstance>(), 4);
    }

    #[test]
    fn test_from_entity() {
        let instance = EntityInstance::from_entity(&entity(1, ShapeKind::Prism, 0));
        assert_eq!(instance.position, [1.0, 0.45, 2.0]);
        assert_eq!(instance.shape, 2);
        assert_eq!(instance.dims, [1.4, 0.9, 1.4]);
        assert_eq!(instance.color, 0xFF6432);
    }

    #[test]
    fn test_extract_keeps_order_and_bytes_match() {
        let entities = [entity(1, ShapeKind::Box, 0), entity(2, ShapeKind::Cylinder, 1)];
        let instances = extract_instances(&entities);

        assert_eq!(instances.len(), 2);
        assert_eq!(instances[1].shape, 1);
        assert_eq!(instance_bytes(&instances).len(), 64);
    }
}
