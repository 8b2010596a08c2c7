//! Physics world interface
//!
//! The gameplay core never talks to a concrete simulator. It spawns, pushes
//! and polls bodies through [`PhysicsWorld`], so the built-in
//! [`SimpleWorld`](super::SimpleWorld) and test doubles are interchangeable.

use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

use super::types::{BodyDesc, Vec3};

/// Failures reported by a physics world when creating a body.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("body mass must be finite and positive, got {0}")]
    InvalidMass(f32),
    #[error("body dimensions must be finite and positive")]
    InvalidShape,
    #[error("spawn position is not finite")]
    InvalidPosition,
    #[error("physics world is full ({0} bodies)")]
    CapacityReached(usize),
}

/// Rigid-body simulation as seen by the gameplay core.
pub trait PhysicsWorld {
    /// Opaque handle to one simulated body.
    type Body: Copy + Eq + Hash + Debug;

    /// Create a body. On error nothing is left behind in the world.
    fn spawn(&mut self, desc: &BodyDesc) -> Result<Self::Body, PhysicsError>;

    /// Destroy a body. Unknown handles are ignored.
    fn despawn(&mut self, body: Self::Body);

    /// Apply an instantaneous impulse (N·s) at `local_point`, relative to the
    /// body's center. Unknown handles are ignored.
    fn apply_impulse(&mut self, body: Self::Body, impulse: Vec3, local_point: Vec3);

    /// Advance the simulation by `dt` seconds.
    fn step(&mut self, dt: f32);

    /// Current center position, or `None` for an unknown handle.
    fn position(&self, body: Self::Body) -> Option<Vec3>;

    /// Current linear velocity, or `None` for an unknown handle.
    fn velocity(&self, body: Self::Body) -> Option<Vec3>;

    /// Number of live bodies.
    fn body_count(&self) -> usize;
}

/// Reject descriptions no world can simulate.
pub fn validate_desc(desc: &BodyDesc) -> Result<(), PhysicsError> {
    if !desc.mass.is_finite() || desc.mass <= 0.0 {
        return Err(PhysicsError::InvalidMass(desc.mass));
    }
    if !desc.position.is_finite() {
        return Err(PhysicsError::InvalidPosition);
    }
    if !desc.shape.is_valid() {
        return Err(PhysicsError::InvalidShape);
    }
    Ok(())
}
