//! Timed rounds.
//!
//! Two-state machine (Idle / Active) over two modes:
//! - Time Attack: 60 second rounds, calm air
//! - Event: 45 second rounds, with wind gusts
//!
//! Expiry and a manual end both go through the same finalize step, which
//! folds the round's best stack into the all-time best height.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::game::systems::HeightTracker;

/// Round modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundMode {
    #[default]
    TimeAttack,
    Event,
}

impl RoundMode {
    pub fn name(self) -> &'static str {
        match self {
            RoundMode::TimeAttack => "Time Attack",
            RoundMode::Event => "Event",
        }
    }

    /// Does this mode blow wind during active rounds?
    pub fn has_wind(self) -> bool {
        matches!(self, RoundMode::Event)
    }
}

/// Round phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    Active,
}

/// Round length per mode, in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundDurations {
    pub time_attack: u32,
    pub event: u32,
}

impl Default for RoundDurations {
    fn default() -> Self {
        Self {
            time_attack: 60,
            event: 45,
        }
    }
}

impl RoundDurations {
    pub fn for_mode(&self, mode: RoundMode) -> u32 {
        match mode {
            RoundMode::TimeAttack => self.time_attack,
            RoundMode::Event => self.event,
        }
    }
}

/// Result of a finished round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundOutcome {
    pub mode: RoundMode,
    /// Tallest stack seen while the round was active
    pub round_max: f32,
    /// All-time best after this round
    pub best_height: f32,
    /// Did this round raise the best height?
    pub new_record: bool,
    /// True when the clock ran out, false for a manual end
    pub expired: bool,
}

/// Round state machine
#[derive(Debug, Clone)]
pub struct RoundSystem {
    mode: RoundMode,
    phase: RoundPhase,
    /// Whole seconds left, within [0, duration]
    remaining: u32,
    best_height: f32,
    durations: RoundDurations,
    /// Fractional second carried between frames
    second_timer: f32,
}

impl Default for RoundSystem {
    fn default() -> Self {
        Self::new(RoundDurations::default())
    }
}

impl RoundSystem {
    /// Idle, in Time Attack, with a full clock
    pub fn new(durations: RoundDurations) -> Self {
        let mode = RoundMode::default();
        Self {
            mode,
            phase: RoundPhase::Idle,
            remaining: durations.for_mode(mode),
            best_height: 0.0,
            durations,
            second_timer: 0.0,
        }
    }

    /// Switch mode. Always lands in Idle with a full clock for the new mode;
    /// the best height is kept.
    pub fn set_mode(&mut self, mode: RoundMode) {
        if self.phase == RoundPhase::Active {
            info!(from = self.mode.name(), to = mode.name(), "mode switched mid-round, round abandoned");
        }
        self.mode = mode;
        self.phase = RoundPhase::Idle;
        self.remaining = self.durations.for_mode(mode);
        self.second_timer = 0.0;
    }

    /// Start a round. Only meaningful from Idle; returns false otherwise.
    pub fn start(&mut self, heights: &mut HeightTracker) -> bool {
        if self.phase == RoundPhase::Active {
            return false;
        }
        self.remaining = self.durations.for_mode(self.mode);
        self.phase = RoundPhase::Active;
        self.second_timer = 0.0;
        heights.reset_round();

        info!(mode = self.mode.name(), seconds = self.remaining, "round started");
        true
    }

    /// One second of countdown. Finalizes and goes Idle when the clock hits zero.
    pub fn tick(&mut self, heights: &HeightTracker) -> Option<RoundOutcome> {
        if self.phase != RoundPhase::Active {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            return Some(self.finalize(heights.round_max(), true));
        }
        None
    }

    /// Manual early stop. No effect while Idle.
    pub fn end(&mut self, heights: &HeightTracker) -> Option<RoundOutcome> {
        if self.phase != RoundPhase::Active {
            return None;
        }
        Some(self.finalize(heights.round_max(), false))
    }

    /// Feed frame time; fires [`tick`](Self::tick) once per whole second.
    pub fn advance(&mut self, dt: f32, heights: &HeightTracker) -> Option<RoundOutcome> {
        if self.phase != RoundPhase::Active || !dt.is_finite() || dt <= 0.0 {
            return None;
        }

        self.second_timer += dt;
        while self.second_timer >= 1.0 {
            self.second_timer -= 1.0;
            if let Some(outcome) = self.tick(heights) {
                return Some(outcome);
            }
        }
        None
    }

    fn finalize(&mut self, round_max: f32, expired: bool) -> RoundOutcome {
        let new_record = round_max > self.best_height;
        if new_record {
            self.best_height = round_max;
        }
        self.phase = RoundPhase::Idle;
        self.second_timer = 0.0;

        info!(
            mode = self.mode.name(),
            round_max,
            best = self.best_height,
            expired,
            "round finished"
        );

        RoundOutcome {
            mode: self.mode,
            round_max,
            best_height: self.best_height,
            new_record,
            expired,
        }
    }

    pub fn mode(&self) -> RoundMode {
        self.mode
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Active
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn best_height(&self) -> f32 {
        self.best_height
    }

    pub fn duration(&self) -> u32 {
        self.durations.for_mode(self.mode)
    }

    /// Remaining time as M:SS
    pub fn remaining_string(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
