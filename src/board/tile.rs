//! A single board cell.

use serde::{Deserialize, Serialize};

use super::inventory::Inventory;
use crate::core::config::{PieceKind, MAX_LEVEL};
use crate::core::coord::Coord;
use crate::core::error::{Error, Rejection, Result};
use crate::core::player::BuilderId;

/// One cell of the grid: structure height, dome flag and occupant.
///
/// Invariants:
/// - `domed` implies `level == MAX_LEVEL`
/// - at most one occupant
///
/// The occupant is stored as a `BuilderId` key, not a reference; the
/// builder in turn stores the tile's `Coord`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TileRepr")]
pub struct Tile {
    coord: Coord,
    level: u8,
    domed: bool,
    occupant: Option<BuilderId>,
}

#[derive(Deserialize)]
struct TileRepr {
    coord: Coord,
    level: u8,
    domed: bool,
    occupant: Option<BuilderId>,
}

impl TryFrom<TileRepr> for Tile {
    type Error = Error;

    fn try_from(repr: TileRepr) -> Result<Self> {
        check_height(repr.coord, repr.level, repr.domed)?;
        Ok(Self {
            coord: repr.coord,
            level: repr.level,
            domed: repr.domed,
            occupant: repr.occupant,
        })
    }
}

/// A tile is at most `MAX_LEVEL` high, and only a `MAX_LEVEL` tile is domed.
pub(crate) fn check_height(coord: Coord, level: u8, domed: bool) -> Result<()> {
    if level > MAX_LEVEL {
        return Err(Error::InvalidData {
            what: "tile",
            detail: format!("{coord} is at level {level}, above {MAX_LEVEL}"),
        });
    }
    if domed && level != MAX_LEVEL {
        return Err(Error::InvalidData {
            what: "tile",
            detail: format!("{coord} is domed at level {level}"),
        });
    }
    Ok(())
}

impl Tile {
    /// A fresh, unbuilt, unoccupied tile.
    #[must_use]
    pub fn new(coord: Coord) -> Self {
        Self {
            coord,
            level: 0,
            domed: false,
            occupant: None,
        }
    }

    #[must_use]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[must_use]
    pub fn is_domed(&self) -> bool {
        self.domed
    }

    #[must_use]
    pub fn occupant(&self) -> Option<BuilderId> {
        self.occupant
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// The piece that the next `build` would consume, or `None` once domed.
    #[must_use]
    pub fn next_piece(&self) -> Option<PieceKind> {
        if self.domed {
            None
        } else {
            PieceKind::for_level(self.level)
        }
    }

    /// Add one piece: raise the level, or cap a level-3 tile with a dome.
    ///
    /// The piece is taken from `inventory` before the tile changes, so a
    /// failed build leaves both untouched.
    ///
    /// # Errors
    ///
    /// - `IllegalBuild` if the tile is already domed.
    /// - `InventoryExhausted` if no piece of the needed kind remains.
    pub fn build(&mut self, inventory: &mut Inventory) -> Result<PieceKind> {
        let kind = self
            .next_piece()
            .ok_or(Error::IllegalBuild {
                target: self.coord,
                reason: Rejection::Domed,
            })?;
        inventory.consume(kind)?;

        if self.level < MAX_LEVEL {
            self.level += 1;
        } else {
            self.domed = true;
        }
        Ok(kind)
    }

    /// Mark the tile as occupied. No legality checking.
    pub fn occupy(&mut self, builder: BuilderId) {
        self.occupant = Some(builder);
    }

    /// Clear the occupant, returning who was there.
    pub fn vacate(&mut self) -> Option<BuilderId> {
        self.occupant.take()
    }
}
