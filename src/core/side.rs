//! Battle sides and per-side data storage.
//!
//! ## Side
//!
//! The two competing sides of battle mode. White always moves first.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`, used for scores, placement
//! counts and board census.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two battle sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// Both sides in turn order.
    pub const ALL: [Side; 2] = [Side::White, Side::Black];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Slot index (White = 0, Black = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use battle_life::core::{Side, SideMap};
///
/// let mut placed: SideMap<u32> = SideMap::default();
/// placed[Side::Black] += 1;
/// assert_eq!(placed[Side::White], 0);
/// assert_eq!(placed[Side::Black], 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

/// Running territory-capture counters.
pub type Scores = SideMap<u64>;

impl<T> SideMap<T> {
    /// Create a new SideMap with values from a factory function.
    pub fn new(mut factory: impl FnMut(Side) -> T) -> Self {
        Self {
            data: [factory(Side::White), factory(Side::Black)],
        }
    }

    /// Iterate over (Side, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T: Copy + std::ops::Add<Output = T>> SideMap<T> {
    /// Sum of both entries.
    #[must_use]
    pub fn total(&self) -> T {
        self.data[0] + self.data[1]
    }
}

impl<T: Ord> SideMap<T> {
    /// The side holding the strictly larger value, or `None` on a tie.
    #[must_use]
    pub fn leader(&self) -> Option<Side> {
        match self.data[0].cmp(&self.data[1]) {
            std::cmp::Ordering::Greater => Some(Side::White),
            std::cmp::Ordering::Less => Some(Side::Black),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        &self.data[side.index()]
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        &mut self.data[side.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_basics() {
        assert_eq!(Side::White.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Side::White.index(), 0);
        assert_eq!(Side::Black.index(), 1);
        assert_eq!(format!("{}", Side::Black), "Black");
    }

    #[test]
    fn test_side_map_new() {
        let map: SideMap<usize> = SideMap::new(|s| s.index() * 10);

        assert_eq!(map[Side::White], 0);
        assert_eq!(map[Side::Black], 10);
    }

    #[test]
    fn test_side_map_mutation_and_total() {
        let mut map: SideMap<u64> = SideMap::default();

        map[Side::White] += 3;
        map[Side::Black] += 4;

        assert_eq!(map.total(), 7);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::White, &3), (Side::Black, &4)]);
    }

    #[test]
    fn test_leader() {
        let mut scores = Scores::default();
        assert_eq!(scores.leader(), None);

        scores[Side::Black] = 2;
        assert_eq!(scores.leader(), Some(Side::Black));

        scores[Side::White] = 5;
        assert_eq!(scores.leader(), Some(Side::White));
    }

    #[test]
    fn test_side_map_serialization() {
        let map: SideMap<u64> = SideMap::new(|s| s.index() as u64 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: SideMap<u64> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
