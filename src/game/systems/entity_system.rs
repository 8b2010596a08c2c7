//! Placed-solid lifecycle management system.
//!
//! Owns the authoritative list of placed solids and their physics bodies.
//! Every body is created, registered, deregistered and destroyed here, so
//! the body registry can never hold a handle whose entity is gone.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::game::systems::{BodyRegistry, HeightTracker};
use crate::game::types::{Entity, EntityId, ShapeKind, SizeSpec};
use crate::physics::{BodyDesc, PhysicsError, PhysicsWorld};

/// Spawn and settle parameters for dropped solids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Height solids are spawned at before they fall onto the table
    pub drop_height: f32,
    /// Body mass (kg)
    pub body_mass: f32,
    /// A body whose vertical speed is below this (m/s) counts as resting.
    /// Horizontal motion is ignored so wind cannot hold a solid unsettled.
    pub settle_speed: f32,
    /// Consecutive resting steps before a solid's height starts counting.
    /// Zero counts every sample, including the fall.
    pub settle_steps: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            drop_height: 6.0,
            body_mass: 1.0,
            settle_speed: 0.1,
            settle_steps: 6,
        }
    }
}

/// A drop the physics world refused.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpawnError {
    #[error("physics world rejected entity {id}: {source}")]
    Physics {
        id: EntityId,
        #[source]
        source: PhysicsError,
    },
}

#[derive(Debug, Clone)]
struct EntitySlot<B> {
    entity: Entity,
    body: B,
    /// Consecutive steps spent below the settle speed (vertically)
    resting_steps: u32,
}

/// Manages the full lifecycle of placed solids.
#[derive(Debug, Clone)]
pub struct EntitySystem<B> {
    /// Insertion order; only meaningful for drawing
    slots: Vec<EntitySlot<B>>,
    next_id: EntityId,
    config: SpawnConfig,
}

impl<B: Copy> Default for EntitySystem<B> {
    fn default() -> Self {
        Self::new(SpawnConfig::default())
    }
}

impl<B: Copy> EntitySystem<B> {
    pub fn new(config: SpawnConfig) -> Self {
        Self {
            slots: Vec::new(),
            next_id: 1,
            config,
        }
    }

    /// Drop a new solid above `drop_point` and let it fall.
    ///
    /// The identifier is consumed even if the physics world refuses the
    /// body, so identifiers stay strictly increasing and are never reused.
    /// A refused body leaves both the registry and the entity list untouched.
    pub fn create<W>(
        &mut self,
        world: &mut W,
        registry: &mut BodyRegistry<B>,
        drop_point: Vec3,
        shape: ShapeKind,
        size: SizeSpec,
        color: usize,
    ) -> Result<&Entity, SpawnError>
    where
        W: PhysicsWorld<Body = B>,
    {
        let id = self.next_id;
        self.next_id += 1;

        let spawn_position = Vec3::new(drop_point.x, self.config.drop_height, drop_point.z);
        let desc = BodyDesc {
            mass: self.config.body_mass,
            position: spawn_position,
            shape: shape.body_shape(size),
        };
        let body = world
            .spawn(&desc)
            .map_err(|source| SpawnError::Physics { id, source })?;

        registry.insert(id, body);
        self.slots.push(EntitySlot {
            entity: Entity {
                id,
                shape,
                size,
                color,
                spawn_position,
                position: spawn_position,
                settled: self.config.settle_steps == 0,
            },
            body,
            resting_steps: 0,
        });

        info!(
            id,
            shape = shape.name(),
            x = spawn_position.x,
            z = spawn_position.z,
            "entity placed"
        );

        let index = self.slots.len() - 1;
        Ok(&self.slots[index].entity)
    }

    /// Remove a solid, its registry entry and its body.
    ///
    /// Returns false (and does nothing) for an unknown or already removed id.
    pub fn remove<W>(&mut self, world: &mut W, registry: &mut BodyRegistry<B>, id: EntityId) -> bool
    where
        W: PhysicsWorld<Body = B>,
    {
        let Some(index) = self.slots.iter().position(|slot| slot.entity.id == id) else {
            return false;
        };

        let slot = self.slots.remove(index);
        registry.remove(id);
        world.despawn(slot.body);

        info!(id, "entity removed");
        true
    }

    /// Remove every solid and reset the session height record.
    pub fn clear<W>(&mut self, world: &mut W, registry: &mut BodyRegistry<B>, heights: &mut HeightTracker)
    where
        W: PhysicsWorld<Body = B>,
    {
        let count = self.slots.len();
        for slot in self.slots.drain(..) {
            world.despawn(slot.body);
        }
        registry.clear();
        heights.clear();

        info!(count, "table cleared");
    }

    /// Poll every live body once and feed settled heights to the tracker.
    ///
    /// Called after each physics step, so each entity's samples reach the
    /// tracker in step order. A solid only reports once it has come to rest,
    /// which keeps the spawn height and the fall out of the record.
    pub fn sync_positions<W>(&mut self, world: &W, heights: &mut HeightTracker, round_active: bool)
    where
        W: PhysicsWorld<Body = B>,
    {
        let settle_steps = self.config.settle_steps;
        let settle_speed = self.config.settle_speed;

        for slot in &mut self.slots {
            let Some(position) = world.position(slot.body) else {
                debug!(id = slot.entity.id, "body missing from physics world");
                continue;
            };
            slot.entity.position = position;

            if !slot.entity.settled {
                let speed = world.velocity(slot.body).map_or(0.0, |v| v.y.abs());
                if speed < settle_speed {
                    slot.resting_steps += 1;
                } else {
                    slot.resting_steps = 0;
                }
                if slot.resting_steps >= settle_steps {
                    slot.entity.settled = true;
                    debug!(id = slot.entity.id, y = position.y, "entity settled");
                }
            }

            if slot.entity.settled {
                heights.record(position.y, slot.entity.size.vertical_extent(), round_active);
            }
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.iter().map(|slot| &slot.entity).find(|e| e.id == id)
    }

    /// Body handle owned by an entity
    pub fn body_of(&self, id: EntityId) -> Option<B> {
        self.slots.iter().find(|slot| slot.entity.id == id).map(|slot| slot.body)
    }

    /// Placed solids in insertion order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.slots.iter().map(|slot| &slot.entity)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Identifier the next drop will receive
    pub fn next_id(&self) -> EntityId {
        self.next_id
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BodyId, SimpleWorld};

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (SimpleWorld, BodyRegistry<BodyId>, EntitySystem<BodyId>) {
        (SimpleWorld::new(), BodyRegistry::new(), EntitySystem::default())
    }

    fn place(
        world: &mut SimpleWorld,
        registry: &mut BodyRegistry<BodyId>,
        entities: &mut EntitySystem<BodyId>,
        x: f32,
    ) -> EntityId {
        entities
            .create(world, registry, Vec3::new(x, 0.0, 0.0), ShapeKind::Box, SizeSpec::new(1.4, 0.9), 0)
            .unwrap()
            .id
    }

    #[test]
    fn test_create_spawns_above_drop_point() {
        let (mut world, mut registry, mut entities) = setup();
        let entity = entities
            .create(
                &mut world,
                &mut registry,
                Vec3::new(2.0, 0.0, 1.5),
                ShapeKind::Cylinder,
                SizeSpec::new(1.4, 0.9),
                3,
            )
            .unwrap()
            .clone();

        assert_eq!(entity.spawn_position, Vec3::new(2.0, 6.0, 1.5));
        assert_eq!(entity.shape, ShapeKind::Cylinder);
        assert_eq!(entity.color, 3);
        assert!(!entity.settled);
        assert_eq!(registry.get(entity.id), entities.body_of(entity.id));
        assert_eq!(world.body_count(), 1);
    }

    #[test]
    fn test_ids_strictly_increase_across_removals() {
        let (mut world, mut registry, mut entities) = setup();
        let a = place(&mut world, &mut registry, &mut entities, 0.0);
        let b = place(&mut world, &mut registry, &mut entities, 3.0);
        entities.remove(&mut world, &mut registry, b);
        let c = place(&mut world, &mut registry, &mut entities, 6.0);

        assert!(a < b && b < c);
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let (mut world, mut registry, mut entities) = setup();
        let id = place(&mut world, &mut registry, &mut entities, 0.0);

        assert!(entities.remove(&mut world, &mut registry, id));
        assert!(!entities.remove(&mut world, &mut registry, id));
        assert!(entities.is_empty());
        assert!(registry.is_empty());
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_failed_spawn_registers_nothing() {
        let (mut world, mut registry, mut entities) = setup();
        let result = entities.create(
            &mut world,
            &mut registry,
            Vec3::ZERO,
            ShapeKind::Box,
            SizeSpec::new(0.0, 0.9),
            0,
        );

        assert!(matches!(
            result,
            Err(SpawnError::Physics { id: 1, source: PhysicsError::InvalidShape })
        ));
        assert!(entities.is_empty());
        assert!(registry.is_empty());
        assert_eq!(entities.next_id(), 2);
    }

    #[test]
    fn test_clear_empties_everything() {
        let (mut world, mut registry, mut entities) = setup();
        let mut heights = HeightTracker::new();
        place(&mut world, &mut registry, &mut entities, 0.0);
        place(&mut world, &mut registry, &mut entities, 3.0);
        heights.record(1.0, 1.0, false);

        entities.clear(&mut world, &mut registry, &mut heights);

        assert!(entities.is_empty());
        assert!(registry.is_empty());
        assert_eq!(world.body_count(), 0);
        assert_eq!(heights.running_max(), 0.0);
    }

    #[test]
    fn test_falling_solid_does_not_report_height() {
        let (mut world, mut registry, mut entities) = setup();
        let mut heights = HeightTracker::new();
        let id = place(&mut world, &mut registry, &mut entities, 0.0);

        for _ in 0..10 {
            world.step(DT);
            entities.sync_positions(&world, &mut heights, false);
        }

        assert!(entities.get(id).unwrap().position.y < 6.0);
        assert!(!entities.get(id).unwrap().settled);
        assert_eq!(heights.running_max(), 0.0);
    }

    #[test]
    fn test_settled_solid_reports_top_surface() {
        let (mut world, mut registry, mut entities) = setup();
        let mut heights = HeightTracker::new();
        let id = place(&mut world, &mut registry, &mut entities, 2.0);

        for _ in 0..300 {
            world.step(DT);
            entities.sync_positions(&world, &mut heights, false);
        }

        assert!(entities.get(id).unwrap().settled);
        assert!((heights.running_max() - 0.9).abs() < 0.05, "max {}", heights.running_max());
    }

    #[test]
    fn test_sliding_solid_still_settles() {
        let (mut world, mut registry, mut entities) = setup();
        let mut heights = HeightTracker::new();
        let id = place(&mut world, &mut registry, &mut entities, 0.0);
        let body = entities.body_of(id).unwrap();

        // A horizontal push every 0.9 s never lets the solid stop sliding
        for step in 0..300 {
            if step % 54 == 0 {
                world.apply_impulse(body, Vec3::new(6.0, 0.0, 0.0), Vec3::ZERO);
            }
            world.step(DT);
            entities.sync_positions(&world, &mut heights, true);
        }

        assert!(world.velocity(body).unwrap().x > 0.1);
        assert!(entities.get(id).unwrap().settled);
        assert!((heights.round_max() - 0.9).abs() < 0.01, "round max {}", heights.round_max());
    }

    #[test]
    fn test_zero_settle_steps_reports_immediately() {
        let mut world = SimpleWorld::new();
        let mut registry = BodyRegistry::new();
        let mut entities = EntitySystem::new(SpawnConfig {
            settle_steps: 0,
            ..SpawnConfig::default()
        });
        let mut heights = HeightTracker::new();
        place(&mut world, &mut registry, &mut entities, 0.0);

        entities.sync_positions(&world, &mut heights, false);

        assert!((heights.running_max() - 6.45).abs() < 1e-5);
    }
}
