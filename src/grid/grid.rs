//! Fixed-size, non-wrapping cell grid.
//!
//! Cells are stored row-major in an `im::Vector`, so cloning a grid (for a
//! render snapshot or as the "before" buffer of a transition) is O(1) and
//! the clone never observes later writes.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::pattern::Pattern;
use crate::core::{SideMap, SimError, SimResult, SimRng, Side};

/// Moore-neighborhood offsets, conventional `x + dx` form.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Live neighbor counts around one cell, from a single pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighborhood {
    /// All live neighbors, owned or not (0..=8).
    pub alive: u8,
    /// Live neighbors owned by White.
    pub white: u8,
    /// Live neighbors owned by Black.
    pub black: u8,
}

impl Neighborhood {
    /// Live neighbors owned by `side`.
    #[must_use]
    pub fn owned_by(&self, side: Side) -> u8 {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }
}

/// The simulation grid.
///
/// Deserialized grids are checked: positive dimensions and exactly
/// `width * height` cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vector<Cell>,
}

/// Unchecked wire form of a `Grid`.
#[derive(Deserialize)]
struct GridRepr {
    width: usize,
    height: usize,
    cells: Vector<Cell>,
}

impl TryFrom<GridRepr> for Grid {
    type Error = SimError;

    fn try_from(repr: GridRepr) -> SimResult<Self> {
        let (Ok(width), Ok(height)) = (i32::try_from(repr.width), i32::try_from(repr.height))
        else {
            return Err(SimError::CorruptState("grid dimensions exceed the coordinate range"));
        };
        let (w, h) = Self::checked_dimensions(width, height)?;
        if w.checked_mul(h) != Some(repr.cells.len()) {
            return Err(SimError::CorruptState("cell count does not match grid dimensions"));
        }
        Ok(Self {
            width: w,
            height: h,
            cells: repr.cells,
        })
    }
}

impl Grid {
    /// Create an all-dead grid.
    ///
    /// Fails with `InvalidDimensions` unless both sides are positive.
    pub fn new(width: i32, height: i32) -> SimResult<Self> {
        let (w, h) = Self::checked_dimensions(width, height)?;
        Ok(Self::dead(w, h))
    }

    fn dead(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: std::iter::repeat(Cell::DEAD).take(width * height).collect(),
        }
    }

    /// Build from row-major cells produced by a rule engine.
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vector<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    fn checked_dimensions(width: i32, height: i32) -> SimResult<(usize, usize)> {
        if width <= 0 || height <= 0 {
            return Err(SimError::InvalidDimensions { width, height });
        }
        Ok((width as usize, height as usize))
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, y)` lies on the grid.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index_of(x, y).is_some()
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let (ux, uy) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (ux < self.width && uy < self.height).then(|| uy * self.width + ux)
    }

    fn checked_index(&self, x: i32, y: i32) -> SimResult<usize> {
        self.index_of(x, y).ok_or(SimError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }

    /// Read one cell.
    pub fn get(&self, x: i32, y: i32) -> SimResult<Cell> {
        let idx = self.checked_index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Overwrite one cell.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> SimResult<()> {
        let idx = self.checked_index(x, y)?;
        self.cells.set(idx, cell);
        Ok(())
    }

    /// Count live cells among the 8 neighbors of `(x, y)`.
    pub fn count_alive_neighbors(&self, x: i32, y: i32) -> SimResult<u8> {
        Ok(self.neighborhood(x, y)?.alive)
    }

    /// Live neighbor counts around `(x, y)`, split by owner.
    pub fn neighborhood(&self, x: i32, y: i32) -> SimResult<Neighborhood> {
        self.checked_index(x, y)?;
        Ok(self.neighborhood_at(x as usize, y as usize))
    }

    /// Neighborhood of an in-bounds cell. Positions off the edge count as dead.
    pub(crate) fn neighborhood_at(&self, x: usize, y: usize) -> Neighborhood {
        let mut summary = Neighborhood::default();
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };
            if nx >= self.width || ny >= self.height {
                continue;
            }
            let cell = self.cells[ny * self.width + nx];
            if cell.is_alive() {
                summary.alive += 1;
                match cell.owner() {
                    Some(Side::White) => summary.white += 1,
                    Some(Side::Black) => summary.black += 1,
                    None => {}
                }
            }
        }
        summary
    }

    /// Replace this grid with an all-dead grid of the new dimensions.
    ///
    /// On `InvalidDimensions` the current grid is left untouched.
    pub fn resize(&mut self, width: i32, height: i32) -> SimResult<()> {
        let (w, h) = Self::checked_dimensions(width, height)?;
        *self = Self::dead(w, h);
        Ok(())
    }

    /// Kill every cell, keeping the dimensions.
    pub fn clear(&mut self) {
        *self = Self::dead(self.width, self.height);
    }

    /// Stamp the live cells of `pattern` with its top-left corner at
    /// `(origin_x, origin_y)`.
    ///
    /// Template cells that land off the grid are skipped; dead template
    /// cells leave the grid as it was. Returns the number of cells written.
    pub fn stamp(&mut self, pattern: &Pattern, origin_x: i32, origin_y: i32) -> usize {
        let mut written = 0;
        for (px, py) in pattern.live_offsets() {
            let (Some(gx), Some(gy)) = (origin_x.checked_add(px), origin_y.checked_add(py)) else {
                continue;
            };
            if let Some(idx) = self.index_of(gx, gy) {
                self.cells.set(idx, Cell::alive());
                written += 1;
            }
        }
        written
    }

    /// Set every cell alive independently with probability `alive_probability`.
    ///
    /// Fails with `InvalidProbability` outside `[0, 1]` without touching the grid.
    pub fn randomize(&mut self, alive_probability: f64, rng: &mut SimRng) -> SimResult<()> {
        if !(0.0..=1.0).contains(&alive_probability) {
            return Err(SimError::InvalidProbability(alive_probability));
        }
        self.cells = (0..self.width * self.height)
            .map(|_| Cell::from_alive(rng.gen_bool(alive_probability)))
            .collect();
        Ok(())
    }

    /// Number of live cells.
    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// True when no cell is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(Cell::is_alive)
    }

    /// Live cells per owning side. Unowned live cells are not counted.
    #[must_use]
    pub fn census(&self) -> SideMap<usize> {
        SideMap::new(|side| {
            self.cells
                .iter()
                .filter(|cell| cell.owner() == Some(side))
                .count()
        })
    }

    /// Iterate over `(x, y, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| ((i % width) as i32, (i / width) as i32, c))
    }

    /// Row-major cell storage.
    pub(crate) fn cells(&self) -> &Vector<Cell> {
        &self.cells
    }
}
