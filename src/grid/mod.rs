//! The cell grid and the pattern catalog.
//!
//! ## Key Types
//!
//! - `Cell`: alive flag plus optional owning side
//! - `Grid`: fixed-size, non-wrapping 2D array of cells
//! - `Neighborhood`: single-pass Moore-neighborhood summary
//! - `Pattern` / `NamedPattern`: stampable templates

pub mod cell;
#[allow(clippy::module_inception)]
pub mod grid;
pub mod pattern;

pub use cell::Cell;
pub use grid::{Grid, Neighborhood};
pub use pattern::{NamedPattern, Offsets, Pattern};
