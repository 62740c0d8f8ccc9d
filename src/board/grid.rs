//! The 5x5 board: tile storage plus the match's piece supply.

use serde::{Deserialize, Serialize};

use super::inventory::Inventory;
use super::tile::Tile;
use crate::core::config::{PieceCounts, PieceKind, RulesConfig};
use crate::core::coord::{Coord, TILE_COUNT};
use crate::core::error::{Error, Result};
use crate::core::player::BuilderId;

/// Owns every `Tile` and the shared `Inventory`.
///
/// Tiles are stored in a flat `Vec` indexed by `Coord::index`. A `Grid`
/// lives for exactly one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    tiles: Vec<Tile>,
    inventory: Inventory,
}

#[derive(Deserialize)]
struct GridRepr {
    tiles: Vec<Tile>,
    inventory: Inventory,
}

impl TryFrom<GridRepr> for Grid {
    type Error = Error;

    fn try_from(GridRepr { tiles, inventory }: GridRepr) -> Result<Self> {
        check_layout(tiles.iter().map(Tile::coord), "grid")?;
        Ok(Self { tiles, inventory })
    }
}

/// Exactly `TILE_COUNT` coordinates, in `Coord::index` order.
pub(crate) fn check_layout(
    coords: impl ExactSizeIterator<Item = Coord>,
    what: &'static str,
) -> Result<()> {
    if coords.len() != TILE_COUNT {
        return Err(Error::InvalidData {
            what,
            detail: format!("{} tiles, expected {TILE_COUNT}", coords.len()),
        });
    }
    for (expected, coord) in Coord::all().zip(coords) {
        if coord != expected {
            return Err(Error::InvalidData {
                what,
                detail: format!("tile {coord} stored where {expected} belongs"),
            });
        }
    }
    Ok(())
}

impl Grid {
    /// A fresh board: every tile at level 0, undomed, unoccupied.
    #[must_use]
    pub fn new(config: &RulesConfig) -> Self {
        Self {
            tiles: Coord::all().map(Tile::new).collect(),
            inventory: Inventory::new(config.piece_caps),
        }
    }

    /// Look up a tile by raw coordinates.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if `x` or `y` lies outside `[1, 5]`.
    pub fn tile_at(&self, x: i32, y: i32) -> Result<&Tile> {
        Coord::new(x, y).map(|c| self.tile(c))
    }

    /// Look up a tile by validated coordinate.
    #[must_use]
    pub fn tile(&self, coord: Coord) -> &Tile {
        &self.tiles[coord.index()]
    }

    pub(crate) fn tile_mut(&mut self, coord: Coord) -> &mut Tile {
        &mut self.tiles[coord.index()]
    }

    /// All tiles, x-major.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Remaining pieces `[L1, L2, L3, Dome]`, for display.
    #[must_use]
    pub fn remaining_pieces(&self) -> PieceCounts {
        self.inventory.remaining_counts()
    }

    /// Add one piece to the tile at `coord`, drawing from the inventory.
    ///
    /// # Errors
    ///
    /// See `Tile::build`.
    pub fn build(&mut self, coord: Coord) -> Result<PieceKind> {
        let Self { tiles, inventory } = self;
        tiles[coord.index()].build(inventory)
    }

    /// Move an occupant marker from one tile to another.
    pub(crate) fn relocate(&mut self, builder: BuilderId, from: Coord, to: Coord) {
        self.tile_mut(from).vacate();
        self.tile_mut(to).occupy(builder);
    }
}
