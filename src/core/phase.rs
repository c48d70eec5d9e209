//! Match modes, lifecycle phases and the command vocabulary.
//!
//! ## Lifecycle
//!
//! Classic: `Idle <-> Running`.
//!
//! Battle: `Placing -> Running -> Ended -> Placing` (the last edge after the
//! cooldown, or on an explicit restart).

use serde::{Deserialize, Serialize};

/// Which rule set the match runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Classic,
    Battle,
}

impl Mode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Mode::Classic => Mode::Battle,
            Mode::Battle => Mode::Classic,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Classic => write!(f, "classic"),
            Mode::Battle => write!(f, "battle"),
        }
    }
}

/// Lifecycle phase of a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Classic mode, not stepping automatically.
    #[default]
    Idle,
    /// Battle setup: players alternately place stones.
    Placing,
    /// Automatic stepping is active.
    Running,
    /// Battle finished (board empty or stopped), waiting for restart.
    Ended,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Placing => "placing",
            Phase::Running => "running",
            Phase::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// Commands accepted by the match controller.
///
/// Carried by `SimError::IllegalTransition` so callers can tell which
/// command was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Step,
    Tick,
    Start,
    Pause,
    SetMode,
    PlaceStone,
    RestartBattle,
    Randomize,
    StampPattern,
    SetCell,
    Clear,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Command::Step => "step",
            Command::Tick => "tick",
            Command::Start => "start",
            Command::Pause => "pause",
            Command::SetMode => "set_mode",
            Command::PlaceStone => "place_stone",
            Command::RestartBattle => "restart_battle",
            Command::Randomize => "randomize",
            Command::StampPattern => "stamp_pattern",
            Command::SetCell => "set_cell",
            Command::Clear => "clear",
        };
        f.write_str(name)
    }
}
