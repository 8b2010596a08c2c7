//! Physics module for the stacking sandbox
//!
//! The gameplay core treats rigid-body dynamics as an external collaborator
//! reached through the [`PhysicsWorld`] trait. [`SimpleWorld`] is the
//! built-in backend: gravity, a ground plane and box-approximated contacts,
//! written from scratch without an external physics library.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Impulses in N·s
//! - Mass in kg
//!
//! # Submodules
//!
//! - [`types`] - Vec3 re-export, body shapes and spawn descriptions
//! - [`world`] - The physics world trait and its error type
//! - [`simple_world`] - Built-in stacking physics

pub mod simple_world;
pub mod types;
pub mod world;

pub use simple_world::{BodyId, PhysicsConfig, SimpleWorld};
pub use types::{BodyDesc, BodyShape, Vec3};
pub use world::{PhysicsError, PhysicsWorld, validate_desc};
