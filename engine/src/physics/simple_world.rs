//! Simple Rigid-Body World
//!
//! Built-in physics backend for the stacking sandbox:
//! - Gravity and a flat, infinitely heavy ground plane
//! - Axis-aligned contacts so dropped solids land on and lean against each other
//! - Linear impulses for wind gusts
//!
//! Bodies never rotate, so the impulse application point only matters for
//! interface parity with full simulators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{BodyDesc, Vec3};
use super::world::{PhysicsError, PhysicsWorld, validate_desc};

/// Handle to a body living in a [`SimpleWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u32);

impl BodyId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Configuration for the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity acceleration (m/s²)
    pub gravity: f32,
    /// Ground plane Y coordinate
    pub ground_level: f32,
    /// Fraction of vertical speed kept when bouncing off the ground
    pub restitution: f32,
    /// Horizontal slow-down rate for bodies touching the ground (1/s)
    pub ground_friction: f32,
    /// How strongly a resting body follows the one under it, per solver pass (0-1)
    pub contact_friction: f32,
    /// Speeds below this are snapped to zero on contact
    pub rest_velocity: f32,
    /// Contact solver passes per step
    pub solver_iterations: u32,
    /// Maximum number of live bodies
    pub max_bodies: usize,
    /// Fixed simulation step (seconds)
    pub fixed_step: f32,
    /// Maximum fixed steps taken for one frame
    pub max_substeps: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.82,
            ground_level: 0.0,
            restitution: 0.2,
            ground_friction: 4.0,
            contact_friction: 0.1,
            rest_velocity: 0.05,
            solver_iterations: 4,
            max_bodies: 512,
            fixed_step: 1.0 / 60.0,
            max_substeps: 8,
        }
    }
}

#[derive(Debug, Clone)]
struct RigidBody {
    position: Vec3,
    velocity: Vec3,
    half_extents: Vec3,
    inverse_mass: f32,
}

/// Hand-written stacking physics
pub struct SimpleWorld {
    /// Bodies keyed by raw handle; ordered so stepping is deterministic
    bodies: BTreeMap<u32, RigidBody>,
    next_id: u32,
    pub config: PhysicsConfig,
}

impl Default for SimpleWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleWorld {
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: BTreeMap::new(),
            next_id: 1,
            config,
        }
    }

    /// Is the body's bottom face touching the ground plane?
    pub fn is_grounded(&self, body: BodyId) -> bool {
        self.bodies
            .get(&body.0)
            .map(|b| b.position.y - b.half_extents.y <= self.config.ground_level + 1e-3)
            .unwrap_or(false)
    }

    /// Push bodies out of the ground and bounce them
    fn clamp_to_ground(&mut self) {
        let ground = self.config.ground_level;
        let restitution = self.config.restitution;
        let rest = self.config.rest_velocity;

        for body in self.bodies.values_mut() {
            let bottom = body.position.y - body.half_extents.y;
            if bottom >= ground {
                continue;
            }
            body.position.y = ground + body.half_extents.y;
            if body.velocity.y < 0.0 {
                body.velocity.y = -body.velocity.y * restitution;
                if body.velocity.y < rest {
                    body.velocity.y = 0.0;
                }
            }
        }
    }

    /// Slide friction for everything sitting on the ground
    fn apply_ground_friction(&mut self, dt: f32) {
        let ground = self.config.ground_level;
        let rest = self.config.rest_velocity;
        let keep = (1.0 - self.config.ground_friction * dt).max(0.0);

        for body in self.bodies.values_mut() {
            if body.position.y - body.half_extents.y > ground + 1e-3 {
                continue;
            }
            body.velocity.x *= keep;
            body.velocity.z *= keep;
            if Vec3::new(body.velocity.x, 0.0, body.velocity.z).length() < rest {
                body.velocity.x = 0.0;
                body.velocity.z = 0.0;
            }
        }
    }

    /// Separate two overlapping bodies along the axis of least penetration
    fn resolve_pair(&mut self, a: u32, b: u32) {
        let (Some(first), Some(second)) = (self.bodies.get(&a), self.bodies.get(&b)) else {
            return;
        };
        let (first, second) = (first.clone(), second.clone());

        let delta = second.position - first.position;
        let overlap = first.half_extents + second.half_extents - delta.abs();
        if overlap.x <= 0.0 || overlap.y <= 0.0 || overlap.z <= 0.0 {
            return;
        }

        if overlap.y <= overlap.x && overlap.y <= overlap.z {
            // Landing on top: the upper body rests on the lower one
            let (upper_id, lower) = if delta.y >= 0.0 { (b, first) } else { (a, second) };
            let friction = self.config.contact_friction.clamp(0.0, 1.0);

            if let Some(upper) = self.bodies.get_mut(&upper_id) {
                upper.position.y += overlap.y;
                if upper.velocity.y < lower.velocity.y {
                    upper.velocity.y = lower.velocity.y;
                }
                upper.velocity.x += (lower.velocity.x - upper.velocity.x) * friction;
                upper.velocity.z += (lower.velocity.z - upper.velocity.z) * friction;
            }
            return;
        }

        // Side contact: split the push by inverse mass, cancel approach speed
        let (normal, depth) = if overlap.x < overlap.z {
            let sign = if delta.x >= 0.0 { 1.0 } else { -1.0 };
            (Vec3::new(sign, 0.0, 0.0), overlap.x)
        } else {
            let sign = if delta.z >= 0.0 { 1.0 } else { -1.0 };
            (Vec3::new(0.0, 0.0, sign), overlap.z)
        };

        let total = first.inverse_mass + second.inverse_mass;
        if total <= 0.0 {
            return;
        }

        let approach = (second.velocity - first.velocity).dot(normal);
        let impulse = if approach < 0.0 { -approach / total } else { 0.0 };

        if let Some(body) = self.bodies.get_mut(&a) {
            body.position -= normal * depth * (first.inverse_mass / total);
            body.velocity -= normal * impulse * first.inverse_mass;
        }
        if let Some(body) = self.bodies.get_mut(&b) {
            body.position += normal * depth * (second.inverse_mass / total);
            body.velocity += normal * impulse * second.inverse_mass;
        }
    }
}

impl PhysicsWorld for SimpleWorld {
    type Body = BodyId;

    fn spawn(&mut self, desc: &BodyDesc) -> Result<BodyId, PhysicsError> {
        validate_desc(desc)?;
        if self.bodies.len() >= self.config.max_bodies {
            return Err(PhysicsError::CapacityReached(self.config.max_bodies));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.bodies.insert(
            id,
            RigidBody {
                position: desc.position,
                velocity: Vec3::ZERO,
                half_extents: desc.shape.half_extents(),
                inverse_mass: 1.0 / desc.mass,
            },
        );
        debug!(body = id, position = ?desc.position, "body spawned");
        Ok(BodyId(id))
    }

    fn despawn(&mut self, body: BodyId) {
        if self.bodies.remove(&body.0).is_some() {
            debug!(body = body.0, "body despawned");
        }
    }

    fn apply_impulse(&mut self, body: BodyId, impulse: Vec3, _local_point: Vec3) {
        if let Some(b) = self.bodies.get_mut(&body.0) {
            b.velocity += impulse * b.inverse_mass;
        }
    }

    fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let gravity = self.config.gravity;
        for body in self.bodies.values_mut() {
            body.velocity.y -= gravity * dt;
            body.position += body.velocity * dt;
        }

        let ids: Vec<u32> = self.bodies.keys().copied().collect();
        for _ in 0..self.config.solver_iterations.max(1) {
            self.clamp_to_ground();
            for i in 0..ids.len() {
                for j in (i + 1)..ids.len() {
                    self.resolve_pair(ids[i], ids[j]);
                }
            }
        }
        self.clamp_to_ground();
        self.apply_ground_friction(dt);
    }

    fn position(&self, body: BodyId) -> Option<Vec3> {
        self.bodies.get(&body.0).map(|b| b.position)
    }

    fn velocity(&self, body: BodyId) -> Option<Vec3> {
        self.bodies.get(&body.0).map(|b| b.velocity)
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}
