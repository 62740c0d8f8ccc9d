//! Builder legality: where a builder may move and where it may build.
//!
//! Both predicates share the first three checks (on the board, a king-move
//! away, not domed and not occupied) and then diverge:
//!
//! - moving limits the climb to one level per move;
//! - building requires the next piece for the target tile to be in supply.
//!
//! Each predicate has a `check_*` form that says *why* a target is refused,
//! and a `can_*` form that only answers yes or no.

use smallvec::SmallVec;
use tracing::debug;

use crate::board::Grid;
use crate::core::config::PieceKind;
use crate::core::coord::{Coord, NEIGHBOR_OFFSETS};
use crate::core::error::{Error, Rejection, Result};
use crate::core::player::BuilderId;

/// Up to eight neighboring destinations.
pub type Destinations = SmallVec<[Coord; 8]>;

/// A movable token bound to one tile of a `Grid`.
///
/// The builder holds its tile's `Coord`; the tile holds the builder's
/// `BuilderId`. Both sides are updated together by `move_to`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Builder {
    id: BuilderId,
    coord: Coord,
}

impl Builder {
    /// Put a new builder on its starting tile, occupying it.
    ///
    /// # Errors
    ///
    /// `IllegalPlacement` if the tile is occupied or domed.
    pub fn place(id: BuilderId, grid: &mut Grid, coord: Coord) -> Result<Self> {
        Self::check_placement(grid, coord)
            .map_err(|reason| Error::IllegalPlacement { target: coord, reason })?;
        grid.tile_mut(coord).occupy(id);
        Ok(Self { id, coord })
    }

    /// Whether a builder could start on `coord`.
    pub fn check_placement(grid: &Grid, coord: Coord) -> Result<(), Rejection> {
        let tile = grid.tile(coord);
        if tile.is_domed() {
            Err(Rejection::Domed)
        } else if tile.is_occupied() {
            Err(Rejection::Occupied)
        } else {
            Ok(())
        }
    }

    #[must_use]
    pub fn id(&self) -> BuilderId {
        self.id
    }

    /// The tile this builder stands on.
    #[must_use]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Height of the tile this builder stands on.
    #[must_use]
    pub fn level(&self, grid: &Grid) -> u8 {
        grid.tile(self.coord).level()
    }

    // === Shared checks ===

    /// Bounds and king-move adjacency, excluding the builder's own tile.
    fn neighbor(&self, x: i32, y: i32) -> Result<Coord, Rejection> {
        let target = Coord::try_new(x, y).ok_or(Rejection::OutOfBounds)?;
        if target == self.coord {
            return Err(Rejection::SameTile);
        }
        if self.coord.chebyshev(target) != 1 {
            return Err(Rejection::NotAdjacent);
        }
        Ok(target)
    }

    /// Target tile must be neither domed nor occupied.
    fn free_tile(grid: &Grid, target: Coord) -> Result<(), Rejection> {
        let tile = grid.tile(target);
        if tile.is_domed() {
            return Err(Rejection::Domed);
        }
        if tile.is_occupied() {
            return Err(Rejection::Occupied);
        }
        Ok(())
    }

    // === Movement ===

    /// Why this builder may or may not move to `(x, y)`.
    pub fn check_move(&self, grid: &Grid, x: i32, y: i32) -> Result<Coord, Rejection> {
        let target = self.neighbor(x, y)?;
        Self::free_tile(grid, target)?;

        let climb = i32::from(grid.tile(target).level()) - i32::from(self.level(grid));
        if climb > 1 {
            return Err(Rejection::TooHigh);
        }
        Ok(target)
    }

    /// Whether this builder may move to `(x, y)`.
    #[must_use]
    pub fn can_move_to(&self, grid: &Grid, x: i32, y: i32) -> bool {
        self.check_move(grid, x, y).is_ok()
    }

    /// Every neighbor this builder may move to.
    #[must_use]
    pub fn legal_moves(&self, grid: &Grid) -> Destinations {
        self.scan_neighbors(|x, y| self.can_move_to(grid, x, y))
    }

    /// True if at least one neighbor is a legal destination.
    #[must_use]
    pub fn has_legal_move(&self, grid: &Grid) -> bool {
        NEIGHBOR_OFFSETS
            .iter()
            .any(|&(dx, dy)| self.can_move_to(grid, self.coord.x() + dx, self.coord.y() + dy))
    }

    /// Move to `(x, y)`, vacating the current tile and occupying the target.
    ///
    /// # Errors
    ///
    /// - `OutOfBounds` for an off-board target.
    /// - `IllegalMove` if `can_move_to` is false.
    pub fn move_to(&mut self, grid: &mut Grid, x: i32, y: i32) -> Result<Coord> {
        let target = Coord::new(x, y)?;
        self.check_move(grid, x, y).map_err(|reason| Error::IllegalMove {
            builder: self.id,
            target,
            reason,
        })?;

        let from = self.coord;
        grid.relocate(self.id, from, target);
        self.coord = target;
        debug!(builder = %self.id, %from, to = %target, "builder moved");
        Ok(from)
    }

    // === Building ===

    /// Why this builder may or may not build on `(x, y)`.
    ///
    /// On success returns the target and the piece it would consume.
    pub fn check_build(&self, grid: &Grid, x: i32, y: i32) -> Result<(Coord, PieceKind), Rejection> {
        let target = self.neighbor(x, y)?;
        Self::free_tile(grid, target)?;

        let kind = grid.tile(target).next_piece().ok_or(Rejection::Domed)?;
        if grid.inventory().remaining(kind) == 0 {
            return Err(Rejection::PieceExhausted(kind));
        }
        Ok((target, kind))
    }

    /// Whether this builder may build on `(x, y)`.
    #[must_use]
    pub fn can_build_on(&self, grid: &Grid, x: i32, y: i32) -> bool {
        self.check_build(grid, x, y).is_ok()
    }

    /// Every neighbor this builder may build on.
    #[must_use]
    pub fn legal_builds(&self, grid: &Grid) -> Destinations {
        self.scan_neighbors(|x, y| self.can_build_on(grid, x, y))
    }

    /// Build on `(x, y)`.
    ///
    /// # Errors
    ///
    /// - `OutOfBounds` for an off-board target.
    /// - `IllegalBuild` if `can_build_on` is false.
    pub fn build_on(&self, grid: &mut Grid, x: i32, y: i32) -> Result<PieceKind> {
        let target = Coord::new(x, y)?;
        self.check_build(grid, x, y)
            .map_err(|reason| Error::IllegalBuild { target, reason })?;

        let kind = grid.build(target)?;
        debug!(builder = %self.id, at = %target, piece = %kind, "piece built");
        Ok(kind)
    }

    fn scan_neighbors(&self, mut legal: impl FnMut(i32, i32) -> bool) -> Destinations {
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy)| (self.coord.x() + dx, self.coord.y() + dy))
            .filter(|&(x, y)| legal(x, y))
            .filter_map(|(x, y)| Coord::try_new(x, y))
            .collect()
    }
}
