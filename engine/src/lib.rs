//! Stack Tok Engine Library
//!
//! Core of a block-stacking sandbox: drop solids onto a table, let physics
//! settle them, track the tallest stack and run timed rounds with wind.
//!
//! # Modules
//!
//! - [`physics`] - Physics world interface and the built-in stacking simulation
//! - [`world`] - World-space configuration (grid, map bounds)
//! - [`game`] - Entities, height tracking, rounds, wind and the session facade
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use stack_tok_engine::game::{RoundMode, SandboxConfig, StackSession};
//!
//! let mut session = StackSession::with_simple_world(&SandboxConfig::default());
//! session.set_mode(RoundMode::TimeAttack);
//! session.start();
//!
//! session.hover(Vec3::new(2.1, 0.0, 1.4));
//! session.drop_at_hover();
//!
//! for _ in 0..240 {
//!     session.update(1.0 / 60.0);
//! }
//! assert!(session.snapshot().running_max > 0.0);
//! ```

pub mod physics;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export world types for convenience
pub use world::{GridConfig, clamp_to_map, snap_to_grid};
// Re-export the physics interface
pub use physics::{BodyDesc, BodyShape, PhysicsError, PhysicsWorld, SimpleWorld};
