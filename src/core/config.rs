//! Match configuration parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{SimError, SimResult};

/// Match configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Grid width in cells (default: 20).
    pub width: i32,

    /// Grid height in cells (default: 20).
    pub height: i32,

    /// Stones each side places before a battle starts (default: 10).
    pub max_placed_per_side: u32,

    /// Pause between automatic steps (default: 0.2s).
    pub step_interval: Duration,

    /// Wait after a battle ends before the next placement phase (default: 20s).
    pub battle_cooldown: Duration,

    /// Alive probability used by `randomize` when the host has no slider value.
    pub fill_probability: f64,

    /// Seed for the shared random source.
    /// Same seed produces the same fills and tie-breaks.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            max_placed_per_side: 10,
            step_interval: Duration::from_millis(200),
            battle_cooldown: Duration::from_secs(20),
            fill_probability: 0.25,
            seed: 42,
        }
    }
}

impl MatchConfig {
    /// Set the grid dimensions.
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the per-side placement cap.
    pub fn with_max_placed(mut self, per_side: u32) -> Self {
        self.max_placed_per_side = per_side;
        self
    }

    /// Set the automatic step interval.
    pub fn with_step_interval(mut self, interval: Duration) -> Self {
        self.step_interval = interval;
        self
    }

    /// Set the post-battle cooldown.
    pub fn with_battle_cooldown(mut self, cooldown: Duration) -> Self {
        self.battle_cooldown = cooldown;
        self
    }

    /// Set the default fill probability.
    pub fn with_fill_probability(mut self, p: f64) -> Self {
        self.fill_probability = p;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every field, reporting the first problem found.
    pub fn validate(&self) -> SimResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SimError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_placed_per_side == 0 {
            return Err(SimError::InvalidConfig("max_placed_per_side must be positive"));
        }
        if self.max_placed_per_side > u32::MAX / 2 {
            return Err(SimError::InvalidConfig("max_placed_per_side is too large"));
        }
        if self.step_interval.is_zero() {
            return Err(SimError::InvalidSpeed(0.0));
        }
        if !(0.0..=1.0).contains(&self.fill_probability) {
            return Err(SimError::InvalidProbability(self.fill_probability));
        }
        Ok(())
    }
}
