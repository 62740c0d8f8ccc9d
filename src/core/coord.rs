//! Board coordinates.
//!
//! Coordinates are 1-based on both axes, `1 <= x, y <= GRID_SIZE`, matching
//! what players type at the console. Legality predicates accept raw `i32`
//! pairs so that off-board targets (e.g. a neighbor of an edge tile) can be
//! answered with `false` instead of an error; everything that stores a
//! position uses the validated `Coord`.
//!
//! ```
//! use not_santorini::core::Coord;
//!
//! let center = Coord::new(3, 3).unwrap();
//! let corner = Coord::new(4, 4).unwrap();
//! assert_eq!(center.chebyshev(corner), 1);
//! assert_eq!(center.neighbors().count(), 8);
//! assert!(Coord::try_new(0, 3).is_none());
//! ```

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Width and height of the square board.
pub const GRID_SIZE: i32 = 5;

/// Number of tiles on the board.
pub const TILE_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// King-move offsets, excluding `(0, 0)`.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A validated, 1-based board position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawCoord")]
pub struct Coord {
    x: u8,
    y: u8,
}

/// Unchecked wire form of `Coord`.
#[derive(Deserialize)]
struct RawCoord {
    x: i32,
    y: i32,
}

impl TryFrom<RawCoord> for Coord {
    type Error = Error;

    fn try_from(raw: RawCoord) -> Result<Self> {
        Self::new(raw.x, raw.y)
    }
}

impl Coord {
    /// Create a coordinate, failing with `OutOfBounds` off the board.
    pub fn new(x: i32, y: i32) -> Result<Self> {
        Self::try_new(x, y).ok_or(Error::OutOfBounds { x, y })
    }

    /// Create a coordinate, or `None` off the board.
    #[must_use]
    pub fn try_new(x: i32, y: i32) -> Option<Self> {
        if Self::in_bounds(x, y) {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// Check whether a raw pair lies on the board.
    #[must_use]
    pub const fn in_bounds(x: i32, y: i32) -> bool {
        x >= 1 && x <= GRID_SIZE && y >= 1 && y <= GRID_SIZE
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x as i32
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y as i32
    }

    /// Row-major index into a `TILE_COUNT` array (x-major, like the board matrix).
    #[must_use]
    pub const fn index(self) -> usize {
        (self.x as usize - 1) * GRID_SIZE as usize + (self.y as usize - 1)
    }

    /// Inverse of `index`.
    #[must_use]
    pub(crate) const fn from_index(index: usize) -> Self {
        Self {
            x: (index / GRID_SIZE as usize) as u8 + 1,
            y: (index % GRID_SIZE as usize) as u8 + 1,
        }
    }

    /// Chebyshev (king-move) distance to a raw pair.
    #[must_use]
    pub fn chebyshev_to(self, x: i32, y: i32) -> i32 {
        (x - self.x()).abs().max((y - self.y()).abs())
    }

    /// Chebyshev (king-move) distance to another coordinate.
    #[must_use]
    pub fn chebyshev(self, other: Coord) -> i32 {
        self.chebyshev_to(other.x(), other.y())
    }

    /// On-board neighbors (up to 8; fewer on edges and corners).
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| Coord::try_new(self.x() + dx, self.y() + dy))
    }

    /// Iterate over every tile position, x-major.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..TILE_COUNT).map(Coord::from_index)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
