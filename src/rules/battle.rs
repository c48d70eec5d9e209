//! Ownership-aware transition with territory scoring.
//!
//! Births and survivals follow the classic rule. Every cell that is alive
//! after the step is claimed by the side with more live neighbors and
//! credits that side one point; a tie is settled by one fair coin flip.

use im::Vector;

use super::engine::{survives, Generation, RuleEngine};
use crate::core::{Mode, Scores, Side, SimRng};
use crate::grid::{Cell, Grid, Neighborhood};

/// Owner for a cell that is alive after the step.
fn claim(neighbors: Neighborhood, rng: &mut SimRng) -> Side {
    match neighbors.white.cmp(&neighbors.black) {
        std::cmp::Ordering::Greater => Side::White,
        std::cmp::Ordering::Less => Side::Black,
        std::cmp::Ordering::Equal => rng.coin_flip(),
    }
}

/// Compute the next battle generation and the points it earns.
///
/// Neighborhoods are read from `grid` only. Tie-break draws happen in
/// row-major cell order, one per tied cell.
pub fn next_generation_battle(grid: &Grid, rng: &mut SimRng) -> Generation {
    let (width, height) = (grid.width(), grid.height());
    let current = grid.cells();
    let mut captured = Scores::default();
    let mut cells = Vector::new();

    for y in 0..height {
        for x in 0..width {
            let alive = current[y * width + x].is_alive();
            let neighbors = grid.neighborhood_at(x, y);

            let next = if survives(alive, neighbors.alive) {
                let side = claim(neighbors, rng);
                captured[side] += 1;
                Cell::owned(side)
            } else {
                Cell::DEAD
            };
            cells.push_back(next);
        }
    }

    Generation {
        grid: Grid::from_cells(width, height, cells),
        captured,
    }
}

/// Battle rule set.
#[derive(Clone, Copy, Debug, Default)]
pub struct BattleRules;

impl RuleEngine for BattleRules {
    fn mode(&self) -> Mode {
        Mode::Battle
    }

    fn advance(&self, grid: &Grid, rng: &mut SimRng) -> Generation {
        next_generation_battle(grid, rng)
    }
}
