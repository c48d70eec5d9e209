//! Read-only projections for renderers.
//!
//! A `MatchSnapshot` is cheap to take (the grid is a persistent vector) and
//! is never affected by later steps. Two snapshots can be diffed to find
//! the cells a view needs to redraw.

use serde::{Deserialize, Serialize};

use super::state::MatchState;
use crate::core::{Phase, Scores, SimResult};
use crate::grid::{Cell, Grid};

/// One cell that differs between two snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub x: i32,
    pub y: i32,
    pub before: Cell,
    pub after: Cell,
}

/// Difference between two grids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridDiff {
    /// Dimensions differ; the view must rebuild from scratch.
    Resized { width: usize, height: usize },
    /// Same dimensions; only these cells changed.
    Cells(Vec<CellChange>),
}

/// Frozen view of the grid and match state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub grid: Grid,
    pub state: MatchState,
}

impl MatchSnapshot {
    pub fn cell_at(&self, x: i32, y: i32) -> SimResult<Cell> {
        self.grid.get(x, y)
    }

    pub fn neighbor_count_at(&self, x: i32, y: i32) -> SimResult<u8> {
        self.grid.count_alive_neighbors(x, y)
    }

    #[must_use]
    pub fn scores(&self) -> Scores {
        self.state.scores
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Cells that changed going from `self` to `newer`.
    #[must_use]
    pub fn diff(&self, newer: &MatchSnapshot) -> GridDiff {
        let (old, new) = (&self.grid, &newer.grid);
        if old.width() != new.width() || old.height() != new.height() {
            return GridDiff::Resized {
                width: new.width(),
                height: new.height(),
            };
        }

        let changes = old
            .iter()
            .zip(new.iter())
            .filter(|((_, _, before), (_, _, after))| before != after)
            .map(|((x, y, before), (_, _, after))| CellChange { x, y, before, after })
            .collect();
        GridDiff::Cells(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Mode, Side};

    fn snapshot(grid: Grid) -> MatchSnapshot {
        MatchSnapshot {
            grid,
            state: MatchState::new(Mode::Battle),
        }
    }

    #[test]
    fn test_diff_lists_changed_cells() {
        let mut grid = Grid::new(3, 3).unwrap();
        let before = snapshot(grid.clone());

        grid.set(1, 2, Cell::owned(Side::Black)).unwrap();
        let after = snapshot(grid);

        assert_eq!(
            before.diff(&after),
            GridDiff::Cells(vec![CellChange {
                x: 1,
                y: 2,
                before: Cell::DEAD,
                after: Cell::owned(Side::Black),
            }])
        );
        assert_eq!(after.diff(&after), GridDiff::Cells(vec![]));
    }

    #[test]
    fn test_diff_detects_resize() {
        let small = snapshot(Grid::new(3, 3).unwrap());
        let big = snapshot(Grid::new(4, 3).unwrap());
        assert_eq!(small.diff(&big), GridDiff::Resized { width: 4, height: 3 });
    }

    #[test]
    fn test_queries() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(0, 0, Cell::alive()).unwrap();
        let snap = snapshot(grid);

        assert_eq!(snap.cell_at(0, 0), Ok(Cell::alive()));
        assert_eq!(snap.neighbor_count_at(1, 1), Ok(1));
        assert_eq!(snap.phase(), Phase::Placing);
        assert_eq!(snap.scores().total(), 0);
    }
}
