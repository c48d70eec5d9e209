//! Rule engine trait shared by the classic and battle rule sets.
//!
//! Engines are pure: they read the current grid and return the next one.
//! The controller decides which engine runs and when.

use crate::core::{Mode, Scores, SimRng};
use crate::grid::Grid;

/// Result of computing one generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
    /// The complete next grid.
    pub grid: Grid,
    /// Cells credited to each side this generation (always zero in classic).
    pub captured: Scores,
}

/// Life-like survival/birth rule shared by both engines.
#[must_use]
pub const fn survives(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `advance` must read only `grid`, never a partially built successor
/// - engines that need no randomness ignore `rng`
pub trait RuleEngine {
    /// Mode this engine implements.
    fn mode(&self) -> Mode;

    /// Compute the next generation from `grid`.
    fn advance(&self, grid: &Grid, rng: &mut SimRng) -> Generation;
}

/// Engine for the given mode.
#[must_use]
pub fn engine_for(mode: Mode) -> &'static dyn RuleEngine {
    match mode {
        Mode::Classic => &super::classic::ClassicRules,
        Mode::Battle => &super::battle::BattleRules,
    }
}
