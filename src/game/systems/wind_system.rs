//! Wind gust driver.
//!
//! On a fixed period, picks one random horizontal direction and pushes every
//! registered body along it with the same impulse. Gating (Event mode, active
//! round) is decided by the caller; this system only keeps the clock and the
//! random source.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::systems::BodyRegistry;
use crate::physics::PhysicsWorld;

/// Allowed gust impulse magnitude (N·s)
pub const WIND_STRENGTH_RANGE: (f32, f32) = (2.0, 14.0);

/// Allowed gust period (milliseconds)
pub const WIND_INTERVAL_RANGE_MS: (u32, u32) = (300, 1500);

/// Wind settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    /// Impulse magnitude applied to each body per gust
    pub strength: f32,
    /// Milliseconds between gusts
    pub interval_ms: u32,
    /// Fixed seed for reproducible gusts; entropy when absent
    pub seed: Option<u64>,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            strength: 6.0,
            interval_ms: 900,
            seed: None,
        }
    }
}

/// One broadcast gust
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindGust {
    /// Unit vector in the horizontal plane
    pub direction: Vec3,
    /// Impulse applied to every body (`direction * strength`)
    pub impulse: Vec3,
    /// How many bodies were pushed
    pub bodies: usize,
}

/// Periodic horizontal impulse broadcaster
#[derive(Debug, Clone)]
pub struct WindSystem {
    strength: f32,
    interval_ms: u32,
    /// Seconds since the last gust (or since wind was enabled)
    timer: f32,
    rng: StdRng,
    last_gust: Option<WindGust>,
}

impl Default for WindSystem {
    fn default() -> Self {
        Self::new(WindConfig::default())
    }
}

impl WindSystem {
    pub fn new(config: WindConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut wind = Self {
            strength: 0.0,
            interval_ms: 0,
            timer: 0.0,
            rng,
            last_gust: None,
        };
        wind.set_strength(config.strength);
        wind.set_interval(config.interval_ms);
        wind
    }

    /// Set gust strength, clamped into [`WIND_STRENGTH_RANGE`].
    /// Non-finite input is ignored.
    pub fn set_strength(&mut self, strength: f32) {
        if !strength.is_finite() {
            return;
        }
        self.strength = strength.clamp(WIND_STRENGTH_RANGE.0, WIND_STRENGTH_RANGE.1);
    }

    /// Set gust period, clamped into [`WIND_INTERVAL_RANGE_MS`]. Takes effect
    /// from the next update; time already accumulated is kept.
    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.clamp(WIND_INTERVAL_RANGE_MS.0, WIND_INTERVAL_RANGE_MS.1);
    }

    /// Advance the gust clock.
    ///
    /// While disabled the clock is held at zero, so the first gust after
    /// enabling comes one full period later. At most one gust fires per call.
    pub fn update<W>(
        &mut self,
        dt: f32,
        enabled: bool,
        registry: &BodyRegistry<W::Body>,
        world: &mut W,
    ) -> Option<WindGust>
    where
        W: PhysicsWorld,
    {
        if !enabled {
            self.timer = 0.0;
            return None;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return None;
        }

        self.timer += dt;
        let period = self.interval_secs();
        if self.timer < period {
            return None;
        }
        self.timer = (self.timer - period).min(period);

        self.gust(registry, world)
    }

    /// Fire one gust right now.
    ///
    /// An empty registry is a no-op and draws no direction.
    pub fn gust<W>(&mut self, registry: &BodyRegistry<W::Body>, world: &mut W) -> Option<WindGust>
    where
        W: PhysicsWorld,
    {
        if registry.is_empty() {
            return None;
        }

        let theta = self.rng.gen_range(0.0..TAU);
        let direction = Vec3::new(theta.cos(), 0.0, theta.sin());
        let impulse = direction * self.strength;

        let mut bodies = 0;
        for body in registry.handles() {
            world.apply_impulse(body, impulse, Vec3::ZERO);
            bodies += 1;
        }

        let gust = WindGust {
            direction,
            impulse,
            bodies,
        };
        debug!(
            dir_x = direction.x,
            dir_z = direction.z,
            strength = self.strength,
            bodies,
            "wind gust"
        );
        self.last_gust = Some(gust);
        Some(gust)
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    fn interval_secs(&self) -> f32 {
        self.interval_ms as f32 / 1000.0
    }

    /// Most recent gust, for HUD arrows
    pub fn last_gust(&self) -> Option<WindGust> {
        self.last_gust
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BodyDesc, BodyId, BodyShape, SimpleWorld};

    fn seeded() -> WindSystem {
        WindSystem::new(WindConfig {
            seed: Some(7),
            ..WindConfig::default()
        })
    }

    fn spawn_box(world: &mut SimpleWorld, registry: &mut BodyRegistry<BodyId>, id: u32, x: f32) -> BodyId {
        let body = world
            .spawn(&BodyDesc {
                mass: 1.0,
                position: Vec3::new(x, 0.5, 0.0),
                shape: BodyShape::Box { half_extents: Vec3::splat(0.5) },
            })
            .unwrap();
        registry.insert(id, body);
        body
    }

    #[test]
    fn test_setters_clamp() {
        let mut wind = seeded();
        wind.set_strength(100.0);
        assert_eq!(wind.strength(), 14.0);
        wind.set_strength(0.5);
        assert_eq!(wind.strength(), 2.0);
        wind.set_strength(f32::NAN);
        assert_eq!(wind.strength(), 2.0);

        wind.set_interval(10);
        assert_eq!(wind.interval_ms(), 300);
        wind.set_interval(5000);
        assert_eq!(wind.interval_ms(), 1500);
    }

    #[test]
    fn test_config_values_are_clamped_on_construction() {
        let wind = WindSystem::new(WindConfig {
            strength: 40.0,
            interval_ms: 50,
            seed: Some(1),
        });
        assert_eq!(wind.strength(), 14.0);
        assert_eq!(wind.interval_ms(), 300);
    }

    #[test]
    fn test_empty_registry_is_noop() {
        let mut wind = seeded();
        let mut world = SimpleWorld::new();
        let registry = BodyRegistry::<BodyId>::new();

        assert_eq!(wind.gust(&registry, &mut world), None);
        assert_eq!(wind.update(1.0, true, &registry, &mut world), None);
        assert_eq!(wind.last_gust(), None);
    }

    #[test]
    fn test_gust_direction_is_horizontal_unit() {
        let mut wind = seeded();
        let mut world = SimpleWorld::new();
        let mut registry = BodyRegistry::new();
        spawn_box(&mut world, &mut registry, 1, 0.0);

        for _ in 0..20 {
            let gust = wind.gust(&registry, &mut world).unwrap();
            assert_eq!(gust.direction.y, 0.0);
            assert!((gust.direction.length() - 1.0).abs() < 1e-5);
            assert!((gust.impulse.length() - 6.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_every_body_gets_the_same_push() {
        let mut wind = seeded();
        let mut world = SimpleWorld::new();
        let mut registry = BodyRegistry::new();
        let a = spawn_box(&mut world, &mut registry, 1, -5.0);
        let b = spawn_box(&mut world, &mut registry, 2, 5.0);

        let gust = wind.gust(&registry, &mut world).unwrap();

        assert_eq!(gust.bodies, 2);
        let va = world.velocity(a).unwrap();
        let vb = world.velocity(b).unwrap();
        assert!((va - gust.impulse).length() < 1e-5);
        assert!((vb - gust.impulse).length() < 1e-5);
    }

    #[test]
    fn test_update_fires_once_per_period() {
        let mut wind = seeded();
        let mut world = SimpleWorld::new();
        let mut registry = BodyRegistry::new();
        spawn_box(&mut world, &mut registry, 1, 0.0);

        let mut gusts = 0;
        for _ in 0..200 {
            if wind.update(0.01, true, &registry, &mut world).is_some() {
                gusts += 1;
            }
        }
        // 2.0 s at 0.9 s per gust
        assert_eq!(gusts, 2);
    }

    #[test]
    fn test_disabled_holds_clock_at_zero() {
        let mut wind = seeded();
        let mut world = SimpleWorld::new();
        let mut registry = BodyRegistry::new();
        spawn_box(&mut world, &mut registry, 1, 0.0);

        assert_eq!(wind.update(0.8, true, &registry, &mut world), None);
        assert_eq!(wind.update(0.8, false, &registry, &mut world), None);
        assert_eq!(wind.update(0.8, true, &registry, &mut world), None);
        assert!(wind.update(0.2, true, &registry, &mut world).is_some());
    }

    #[test]
    fn test_same_seed_same_directions() {
        let mut world = SimpleWorld::new();
        let mut registry = BodyRegistry::new();
        spawn_box(&mut world, &mut registry, 1, 0.0);

        let mut a = seeded();
        let mut b = seeded();
        for _ in 0..5 {
            let ga = a.gust(&registry, &mut world).unwrap();
            let gb = b.gust(&registry, &mut world).unwrap();
            assert_eq!(ga.direction, gb.direction);
        }
    }
}
