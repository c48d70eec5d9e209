//! A single grid cell: alive flag plus optional owning side.

use serde::{Deserialize, Serialize};

use crate::core::{Side, SimError, SimResult};

/// Cell state.
///
/// Fields are private so the ownership invariant holds by construction:
/// an owned cell is always alive and a dead cell is never owned.
/// Deserialization goes through the same check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CellRepr")]
pub struct Cell {
    alive: bool,
    owner: Option<Side>,
}

impl Cell {
    /// A dead, unowned cell.
    pub const DEAD: Cell = Cell {
        alive: false,
        owner: None,
    };

    /// A live cell with no owner (classic mode).
    #[must_use]
    pub const fn alive() -> Self {
        Self {
            alive: true,
            owner: None,
        }
    }

    /// A live cell owned by `side` (battle mode).
    #[must_use]
    pub const fn owned(side: Side) -> Self {
        Self {
            alive: true,
            owner: Some(side),
        }
    }

    /// Dead or unowned-alive depending on `alive`.
    #[must_use]
    pub const fn from_alive(alive: bool) -> Self {
        if alive {
            Self::alive()
        } else {
            Self::DEAD
        }
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub const fn owner(&self) -> Option<Side> {
        self.owner
    }
}

/// Unchecked wire form of a `Cell`.
#[derive(Deserialize)]
struct CellRepr {
    alive: bool,
    owner: Option<Side>,
}

impl TryFrom<CellRepr> for Cell {
    type Error = SimError;

    fn try_from(repr: CellRepr) -> SimResult<Self> {
        match (repr.alive, repr.owner) {
            (true, Some(side)) => Ok(Cell::owned(side)),
            (alive, None) => Ok(Cell::from_alive(alive)),
            (false, Some(_)) => Err(SimError::CorruptState("dead cell with an owner")),
        }
    }
}
