//! Stampable live/dead templates and the fixed pattern catalog.
//!
//! Layouts are row-major with row 0 first; `1` marks a live cell. Row index
//! maps to `y`, column index to `x`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{SimError, SimResult};

const BLINKER: &[&[u8]] = &[&[1, 1, 1]];

const TOAD: &[&[u8]] = &[&[1, 1, 1, 0], &[0, 1, 1, 1]];

const BEACON: &[&[u8]] = &[
    &[1, 1, 0, 0],
    &[1, 0, 0, 0],
    &[0, 0, 0, 1],
    &[0, 0, 1, 1],
];

const GLIDER: &[&[u8]] = &[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1]];

const PULSAR: &[&[u8]] = &[
    &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
    &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
    &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[1, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1],
    &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    &[0, 0, 1, 1, 1, 0, 0, 0, 1, 1, 1, 0, 0],
];

/// Live-cell offsets of a pattern; small shapes stay on the stack.
pub type Offsets = SmallVec<[(i32, i32); 16]>;

/// An immutable rectangular live/dead template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern {
    name: &'static str,
    rows: &'static [&'static [u8]],
}

impl Pattern {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Whether the template cell at column `px`, row `py` is live.
    #[must_use]
    pub fn is_live(&self, px: usize, py: usize) -> bool {
        self.rows
            .get(py)
            .and_then(|row| row.get(px))
            .is_some_and(|&v| v == 1)
    }

    /// `(x, y)` offsets of every live template cell, row by row.
    #[must_use]
    pub fn live_offsets(&self) -> Offsets {
        (0..self.height())
            .flat_map(|py| (0..self.width()).map(move |px| (px, py)))
            .filter(|&(px, py)| self.is_live(px, py))
            .map(|(px, py)| (px as i32, py as i32))
            .collect()
    }
}

/// The fixed pattern catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedPattern {
    Blinker,
    Toad,
    Beacon,
    Glider,
    Pulsar,
}

impl NamedPattern {
    /// Every catalog entry, in menu order.
    pub const ALL: [NamedPattern; 5] = [
        NamedPattern::Blinker,
        NamedPattern::Toad,
        NamedPattern::Beacon,
        NamedPattern::Glider,
        NamedPattern::Pulsar,
    ];

    /// The template for this entry.
    #[must_use]
    pub const fn pattern(self) -> Pattern {
        match self {
            NamedPattern::Blinker => Pattern { name: "Blinker", rows: BLINKER },
            NamedPattern::Toad => Pattern { name: "Toad", rows: TOAD },
            NamedPattern::Beacon => Pattern { name: "Beacon", rows: BEACON },
            NamedPattern::Glider => Pattern { name: "Glider", rows: GLIDER },
            NamedPattern::Pulsar => Pattern { name: "Pulsar", rows: PULSAR },
        }
    }
}

impl FromStr for NamedPattern {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        let name = s.trim();
        NamedPattern::ALL
            .into_iter()
            .find(|p| p.pattern().name().eq_ignore_ascii_case(name))
            .ok_or_else(|| SimError::UnknownPattern(s.to_string()))
    }
}

impl std::fmt::Display for NamedPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.pattern().name())
    }
}
