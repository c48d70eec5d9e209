//! Hosting a match: the automatic loop and the session facade.
//!
//! ## Key Types
//!
//! - `Session`: owns a shared `MatchController` and keeps the runner in step
//!   with the match phase
//! - `RunHandle`: cancellable handle to the worker thread that ticks the
//!   controller once per step interval

mod runner;
mod session;

pub use runner::{spawn_runner, RunHandle};
pub use session::Session;
