//! Standard Game-of-Life transition.

use im::Vector;

use super::engine::{survives, Generation, RuleEngine};
use crate::core::{Mode, Scores, SimRng};
use crate::grid::{Cell, Grid};

/// Compute the next classic generation.
///
/// Every neighbor count is taken from `grid`, which is never written, so no
/// cell sees another cell's updated state. Result cells are never owned.
#[must_use]
pub fn next_generation(grid: &Grid) -> Grid {
    let (width, height) = (grid.width(), grid.height());
    let current = grid.cells();

    let cells: Vector<Cell> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| {
            let alive = current[y * width + x].is_alive();
            let n = grid.neighborhood_at(x, y).alive;
            Cell::from_alive(survives(alive, n))
        })
        .collect();

    Grid::from_cells(width, height, cells)
}

/// Classic rule set.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassicRules;

impl RuleEngine for ClassicRules {
    fn mode(&self) -> Mode {
        Mode::Classic
    }

    fn advance(&self, grid: &Grid, _rng: &mut SimRng) -> Generation {
        Generation {
            grid: next_generation(grid),
            captured: Scores::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Side;
    use crate::grid::NamedPattern;

    fn live_set(grid: &Grid) -> Vec<(i32, i32)> {
        grid.iter()
            .filter(|(_, _, c)| c.is_alive())
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_block_is_still_life() {
        let mut grid = Grid::new(4, 4).unwrap();
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            grid.set(x, y, Cell::alive()).unwrap();
        }
        assert_eq!(next_generation(&grid), grid);
    }

    #[test]
    fn test_lonely_cell_dies() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 1, Cell::alive()).unwrap();
        assert!(next_generation(&grid).is_empty());
    }

    #[test]
    fn test_overcrowded_center_dies() {
        let mut grid = Grid::new(3, 3).unwrap();
        for (x, y, _) in grid.clone().iter() {
            grid.set(x, y, Cell::alive()).unwrap();
        }
        let next = next_generation(&grid);
        assert!(!next.get(1, 1).unwrap().is_alive());
        // corners have 3 neighbors and survive
        assert_eq!(live_set(&next), vec![(0, 0), (2, 0), (0, 2), (2, 2)]);
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.stamp(&NamedPattern::Blinker.pattern(), 1, 2);
        let horizontal = live_set(&grid);

        let once = next_generation(&grid);
        assert_eq!(live_set(&once), vec![(2, 1), (2, 2), (2, 3)]);

        let twice = next_generation(&once);
        assert_eq!(live_set(&twice), horizontal);
    }

    #[test]
    fn test_owners_are_dropped() {
        let mut grid = Grid::new(5, 5).unwrap();
        for x in 1..=3 {
            grid.set(x, 2, Cell::owned(Side::White)).unwrap();
        }
        let next = next_generation(&grid);
        assert!(next.iter().all(|(_, _, c)| c.owner().is_none()));
        assert_eq!(next.population(), 3);
    }

    #[test]
    fn test_engine_reports_no_captures() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.stamp(&NamedPattern::Blinker.pattern(), 1, 2);
        let generation = ClassicRules.advance(&grid, &mut SimRng::new(0));
        assert_eq!(generation.captured.total(), 0);
        assert_eq!(generation.grid, next_generation(&grid));
    }
}
