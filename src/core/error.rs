//! Error taxonomy for the simulation.
//!
//! Every error is local and recoverable: the offending call is rejected and
//! no state is changed.

use thiserror::Error;

use super::phase::{Command, Mode, Phase};
use super::side::Side;

/// Result alias used across the crate.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the grid, the rule engines and the match controller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("alive probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("invalid placement: {0}")]
    InvalidPlacement(PlacementError),
    #[error("{command} is not allowed in {mode} mode while {phase}")]
    IllegalTransition {
        command: Command,
        mode: Mode,
        phase: Phase,
    },
    #[error("step interval must be a positive number of seconds, got {0}")]
    InvalidSpeed(f64),
    #[error("unknown pattern `{0}`")]
    UnknownPattern(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("corrupt state: {0}")]
    CorruptState(&'static str),
}

/// Why a stone could not be placed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("cell is already alive")]
    Occupied,
    #[error("it is {expected}'s turn, not {got}'s")]
    WrongTurn { expected: Side, got: Side },
}

impl From<PlacementError> for SimError {
    fn from(err: PlacementError) -> Self {
        SimError::InvalidPlacement(err)
    }
}
