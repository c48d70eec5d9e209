//! Core engine types: sides, modes and phases, errors, RNG, configuration.
//!
//! Everything else in the crate builds on these.

pub mod config;
pub mod error;
pub mod phase;
pub mod rng;
pub mod side;

pub use config::MatchConfig;
pub use error::{PlacementError, SimError, SimResult};
pub use phase::{Command, Mode, Phase};
pub use rng::SimRng;
pub use side::{Scores, Side, SideMap};
