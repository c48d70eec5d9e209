//! Match orchestration: state machine, notifications and snapshots.
//!
//! ## Key Types
//!
//! - `MatchController`: owns the grid and decides which engine runs and when
//! - `MatchState`: mode, phase, turn, placement counts, scores
//! - `MatchEvent` / `EventBus`: change notification for renderers
//! - `MatchSnapshot`: frozen, diffable view for rendering

pub mod controller;
pub mod events;
pub mod snapshot;
pub mod state;

pub use controller::{MatchController, StepReport, TickOutcome};
pub use events::{EventBus, MatchEvent, SubscriberId, EVENT_BUFFER};
pub use snapshot::{CellChange, GridDiff, MatchSnapshot};
pub use state::MatchState;
