//! Height tracking.
//!
//! Turns per-step body centers into top-surface heights and keeps two
//! monotone maxima: one for the whole play session and one for the current
//! round. Samples only ever raise a maximum on a strict increase, so the
//! display does not flicker while a stack settles.

/// Running maxima of the tallest top surface seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeightTracker {
    /// Highest top surface this session; survives rounds, reset by `clear`
    running_max: f32,
    /// Highest top surface while the current round was active
    round_max: f32,
}

impl HeightTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample: a body's center height and its vertical extent.
    ///
    /// Returns the sample's top-surface height.
    pub fn record(&mut self, center_y: f32, vertical_extent: f32, round_active: bool) -> f32 {
        let top = center_y + vertical_extent * 0.5;
        if !top.is_finite() {
            return top;
        }

        if top > self.running_max {
            self.running_max = top;
        }
        if round_active && top > self.round_max {
            self.round_max = top;
        }
        top
    }

    pub fn running_max(&self) -> f32 {
        self.running_max
    }

    pub fn round_max(&self) -> f32 {
        self.round_max
    }

    /// Zero the round maximum at the start of a round.
    pub fn reset_round(&mut self) {
        self.round_max = 0.0;
    }

    /// Zero the session maximum. Only a full table clear calls this.
    pub fn clear(&mut self) {
        self.running_max = 0.0;
    }
}
