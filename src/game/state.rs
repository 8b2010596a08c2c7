//! Game State
//!
//! Central session struct that holds every stacking system together and
//! exposes the command and read surface a UI drives.

use glam::Vec3;
use tracing::warn;

use crate::game::builder::{GhostPreview, ToolConfig, ghost_preview};
use crate::game::config::SandboxConfig;
use crate::game::render::{EntityInstance, extract_instances};
use crate::game::systems::{
    BodyRegistry, EntitySystem, HeightTracker, RoundMode, RoundOutcome, RoundPhase, RoundSystem,
    SpawnError, WindGust, WindSystem,
};
use crate::game::types::{Entity, EntityId, ShapeKind};
use crate::physics::{PhysicsWorld, SimpleWorld};
use crate::world::GridConfig;

/// Round state as shown in the HUD
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    pub mode: RoundMode,
    pub phase: RoundPhase,
    pub active: bool,
    /// Whole seconds left
    pub remaining: u32,
    /// Remaining time as M:SS
    pub remaining_label: String,
    /// Tallest stack since the last clear
    pub running_max: f32,
    /// Tallest stack in the current (or last) round
    pub round_max: f32,
    pub best_height: f32,
    pub entity_count: usize,
}

/// What happened during one [`StackSession::update`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    /// Physics steps taken
    pub steps: u32,
    /// Set when the round clock ran out this frame
    pub finished: Option<RoundOutcome>,
    /// Set when a wind gust fired this frame
    pub gust: Option<WindGust>,
}

/// One stacking session over a physics world
pub struct StackSession<W: PhysicsWorld> {
    // === Simulation ===
    world: W,
    registry: BodyRegistry<W::Body>,
    entities: EntitySystem<W::Body>,
    heights: HeightTracker,
    /// Fixed physics step (seconds)
    fixed_step: f32,
    max_substeps: u32,
    step_accumulator: f32,

    // === Rules ===
    round: RoundSystem,
    wind: WindSystem,

    // === Input ===
    grid: GridConfig,
    tool: ToolConfig,
    /// Snapped hover point, if the pointer is over the table
    hover: Option<Vec3>,
}

impl StackSession<SimpleWorld> {
    /// Session on the built-in stacking physics
    pub fn with_simple_world(config: &SandboxConfig) -> Self {
        Self::new(SimpleWorld::with_config(config.physics.clone()), config)
    }
}

impl<W: PhysicsWorld> StackSession<W> {
    pub fn new(world: W, config: &SandboxConfig) -> Self {
        let fixed_step = if config.physics.fixed_step.is_finite() && config.physics.fixed_step > 0.0 {
            config.physics.fixed_step
        } else {
            1.0 / 60.0
        };

        Self {
            world,
            registry: BodyRegistry::new(),
            entities: EntitySystem::new(config.spawn),
            heights: HeightTracker::new(),
            fixed_step,
            max_substeps: config.physics.max_substeps.max(1),
            step_accumulator: 0.0,

            round: RoundSystem::new(config.rounds),
            wind: WindSystem::new(config.wind),

            grid: config.grid,
            tool: config.tool.sanitized(),
            hover: None,
        }
    }

    // === Pointer ===

    /// Snap a raw pointer hit and remember it as the hover point.
    pub fn hover(&mut self, raw: Vec3) -> Vec3 {
        let snapped = self.grid.snap_and_clamp(raw);
        self.hover = Some(snapped);
        snapped
    }

    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    /// Drop a solid with the current tool above `point` (snapped first).
    pub fn drop_at(&mut self, point: Vec3) -> Result<EntityId, SpawnError> {
        let snapped = self.grid.snap_and_clamp(point);
        let result = self.entities.create(
            &mut self.world,
            &mut self.registry,
            snapped,
            self.tool.shape,
            self.tool.size(),
            self.tool.color_index,
        );
        match result {
            Ok(entity) => Ok(entity.id),
            Err(e) => {
                warn!(error = %e, "drop rejected");
                Err(e)
            }
        }
    }

    /// Drop at the hover point. `None` when nothing is hovered.
    pub fn drop_at_hover(&mut self) -> Option<Result<EntityId, SpawnError>> {
        let hover = self.hover?;
        Some(self.drop_at(hover))
    }

    // === Commands ===

    /// Remove one solid. Unknown ids are ignored.
    pub fn remove(&mut self, id: EntityId) -> bool {
        self.entities.remove(&mut self.world, &mut self.registry, id)
    }

    /// Remove every solid and reset the running maximum.
    pub fn clear(&mut self) {
        self.entities
            .clear(&mut self.world, &mut self.registry, &mut self.heights);
    }

    pub fn set_mode(&mut self, mode: RoundMode) {
        self.round.set_mode(mode);
    }

    pub fn start(&mut self) -> bool {
        self.round.start(&mut self.heights)
    }

    pub fn end(&mut self) -> Option<RoundOutcome> {
        self.round.end(&self.heights)
    }

    pub fn set_wind_strength(&mut self, strength: f32) {
        self.wind.set_strength(strength);
    }

    pub fn set_wind_interval(&mut self, interval_ms: u32) {
        self.wind.set_interval(interval_ms);
    }

    // === Tool ===

    pub fn set_shape(&mut self, shape: ShapeKind) {
        self.tool.set_shape(shape);
    }

    pub fn cycle_shape(&mut self) -> ShapeKind {
        self.tool.cycle_shape()
    }

    pub fn set_footprint(&mut self, footprint: f32) {
        self.tool.set_footprint(footprint);
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.tool.set_thickness(thickness);
    }

    pub fn set_color(&mut self, index: usize) {
        self.tool.set_color(index);
    }

    // === Frame ===

    /// Advance one frame.
    ///
    /// Runs fixed physics steps for the elapsed time, polling every body
    /// after each step, then the round clock, then the wind.
    pub fn update(&mut self, dt: f32) -> FrameReport {
        let mut report = FrameReport::default();
        if !dt.is_finite() || dt <= 0.0 {
            return report;
        }

        self.step_accumulator += dt;
        while self.step_accumulator >= self.fixed_step && report.steps < self.max_substeps {
            self.step_accumulator -= self.fixed_step;
            self.world.step(self.fixed_step);
            self.entities
                .sync_positions(&self.world, &mut self.heights, self.round.is_active());
            report.steps += 1;
        }
        if report.steps == self.max_substeps && self.step_accumulator >= self.fixed_step {
            warn!(backlog = self.step_accumulator, "physics falling behind, dropping time");
            self.step_accumulator = 0.0;
        }

        report.finished = self.round.advance(dt, &self.heights);

        let wind_on = self.round.mode().has_wind() && self.round.is_active();
        report.gust = self.wind.update(dt, wind_on, &self.registry, &mut self.world);

        report
    }

    // === Read surface ===

    /// Placed solids in insertion order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.entities()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn preview(&self) -> Option<GhostPreview> {
        ghost_preview(self.hover, &self.tool)
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            mode: self.round.mode(),
            phase: self.round.phase(),
            active: self.round.is_active(),
            remaining: self.round.remaining(),
            remaining_label: self.round.remaining_string(),
            running_max: self.heights.running_max(),
            round_max: self.heights.round_max(),
            best_height: self.round.best_height(),
            entity_count: self.entities.len(),
        }
    }

    /// GPU instances for every placed solid
    pub fn instances(&self) -> Vec<EntityInstance> {
        extract_instances(self.entities.entities())
    }

    /// GPU instance for the ghost, if one is visible
    pub fn ghost_instance(&self) -> Option<EntityInstance> {
        self.preview().as_ref().map(EntityInstance::from_ghost)
    }

    pub fn hover_point(&self) -> Option<Vec3> {
        self.hover
    }

    pub fn tool(&self) -> &ToolConfig {
        &self.tool
    }

    pub fn round(&self) -> &RoundSystem {
        &self.round
    }

    pub fn wind(&self) -> &WindSystem {
        &self.wind
    }

    pub fn heights(&self) -> &HeightTracker {
        &self.heights
    }

    pub fn registry(&self) -> &BodyRegistry<W::Body> {
        &self.registry
    }

    pub fn world(&self) -> &W {
        &self.world
    }
}
