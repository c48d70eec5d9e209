//! Match state: mode, phase, turn, placement counts and scores.
//!
//! The rule engines never see this; only the controller reads and
//! mutates it.

use serde::{Deserialize, Serialize};

use crate::core::{Mode, Phase, Scores, Side, SideMap};

/// Turn and phase bookkeeping for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Rule set in use.
    pub mode: Mode,

    /// Lifecycle phase.
    pub phase: Phase,

    /// Side to place the next stone (meaningful in battle placement only).
    pub turn: Side,

    /// Stones placed so far in this match.
    pub placed: SideMap<u32>,

    /// Running territory-capture counters. Never decrease within a match.
    pub scores: Scores,

    /// Generations computed since the match (or classic session) was reset.
    pub generation: u64,
}

impl MatchState {
    /// Initial state on entering `mode`.
    ///
    /// ## Defaults
    ///
    /// - Classic: `Idle`
    /// - Battle: `Placing`, White to move
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        let phase = match mode {
            Mode::Classic => Phase::Idle,
            Mode::Battle => Phase::Placing,
        };
        Self {
            mode,
            phase,
            turn: Side::White,
            placed: SideMap::default(),
            scores: Scores::default(),
            generation: 0,
        }
    }

    /// Total stones placed by both sides.
    #[must_use]
    pub fn placed_total(&self) -> u32 {
        self.placed.total()
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(Mode::Classic)
    }
}
