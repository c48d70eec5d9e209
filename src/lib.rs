//! # battle-life
//!
//! Conway's Game of Life with a two-player territory variant.
//!
//! ## Modes
//!
//! 1. **Classic**: B3/S23 on a bounded, non-wrapping grid. Cells are edited
//!    directly (toggle, random fill, catalog patterns) and the simulation
//!    is stepped manually or by the automatic loop.
//!
//! 2. **Battle**: White and Black alternate placing a fixed number of
//!    stones, then the board evolves on its own. Every live cell belongs to
//!    the side holding the majority among its live neighbors, and each
//!    generation scores one point per owned live cell. The battle ends when
//!    the board empties (or is paused) and restarts after a cooldown.
//!
//! ## Architecture
//!
//! - **Double Buffering**: every generation is computed from an immutable
//!   view of the previous one and swapped in whole.
//!
//! - **Persistent Data Structures**: the grid is an `im::Vector`, so
//!   snapshots for renderers are O(1).
//!
//! - **Seeded Randomness**: tie-breaks and random fills draw from a single
//!   ChaCha stream owned by the controller; a seed reproduces a match.
//!
//! ## Modules
//!
//! - `core`: sides, modes and phases, errors, RNG, configuration
//! - `grid`: cells, the grid, neighbor counting, pattern catalog
//! - `rules`: classic and battle transition engines
//! - `game`: the match controller, events and snapshots
//! - `runtime`: the automatic loop and the session facade

pub mod core;
pub mod game;
pub mod grid;
pub mod rules;
pub mod runtime;

// Re-export commonly used types
pub use crate::core::{
    Command, MatchConfig, Mode, Phase, PlacementError, Scores, Side, SideMap, SimError,
    SimResult, SimRng,
};

pub use crate::grid::{Cell, Grid, NamedPattern, Neighborhood, Pattern};

pub use crate::rules::{engine_for, Generation, RuleEngine};

pub use crate::game::{
    EventBus, GridDiff, MatchController, MatchEvent, MatchSnapshot, MatchState, StepReport,
    SubscriberId, TickOutcome,
};

pub use crate::runtime::{spawn_runner, RunHandle, Session};
