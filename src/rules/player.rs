//! A player and their two builders.

use smallvec::SmallVec;

use super::builder::Builder;
use crate::board::Grid;
use crate::core::config::{PieceKind, MAX_LEVEL};
use crate::core::coord::Coord;
use crate::core::error::{Rejection, Result};
use crate::core::player::{BuilderNumber, PlayerId};

/// Builders that could carry out a requested move.
pub type BuilderOptions = SmallVec<[BuilderNumber; 2]>;

/// Outcome of asking a player to move to a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveAttempt {
    /// Exactly one builder could go there, and it did.
    Moved { builder: BuilderNumber, from: Coord },
    /// Both builders could go there; the caller must choose.
    Ambiguous,
    /// Neither builder can reach the tile.
    NoLegalMove,
}

/// One of the two sides, owning exactly two builders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    builders: [Builder; 2],
}

impl Player {
    /// Builders must already be placed and belong to `id`, in number order.
    #[must_use]
    pub fn new(id: PlayerId, builders: [Builder; 2]) -> Self {
        debug_assert!(builders
            .iter()
            .zip(BuilderNumber::all())
            .all(|(b, n)| b.id().player == id && b.id().number == n));
        Self { id, builders }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn builder(&self, number: BuilderNumber) -> &Builder {
        &self.builders[number.index()]
    }

    pub fn builders(&self) -> impl Iterator<Item = &Builder> {
        self.builders.iter()
    }

    /// Which of this player's builders may legally move to `(x, y)`.
    #[must_use]
    pub fn movable_builders(&self, grid: &Grid, x: i32, y: i32) -> BuilderOptions {
        self.builders
            .iter()
            .filter(|b| b.can_move_to(grid, x, y))
            .map(|b| b.id().number)
            .collect()
    }

    /// Move whichever builder can reach `(x, y)`.
    ///
    /// Nothing changes unless exactly one builder qualifies.
    pub fn attempt_move(&mut self, grid: &mut Grid, x: i32, y: i32) -> Result<MoveAttempt> {
        let options = self.movable_builders(grid, x, y);
        match options.as_slice() {
            [] => Ok(MoveAttempt::NoLegalMove),
            [only] => {
                let from = self.move_builder(grid, *only, x, y)?;
                Ok(MoveAttempt::Moved {
                    builder: *only,
                    from,
                })
            }
            _ => Ok(MoveAttempt::Ambiguous),
        }
    }

    /// Move a specific builder. Returns the tile it left.
    ///
    /// # Errors
    ///
    /// `IllegalMove` if that builder cannot move there.
    pub fn move_builder(
        &mut self,
        grid: &mut Grid,
        number: BuilderNumber,
        x: i32,
        y: i32,
    ) -> Result<Coord> {
        self.builders[number.index()].move_to(grid, x, y)
    }

    /// Build with a specific builder, if legal.
    ///
    /// Refusals are returned as values; the grid is only touched on success.
    pub fn attempt_build(
        &self,
        grid: &mut Grid,
        number: BuilderNumber,
        x: i32,
        y: i32,
    ) -> Result<Result<PieceKind, Rejection>> {
        let builder = self.builder(number);
        match builder.check_build(grid, x, y) {
            Ok(_) => builder.build_on(grid, x, y).map(Ok),
            Err(rejection) => Ok(Err(rejection)),
        }
    }

    /// True once any builder stands on an undomed level-3 tile.
    #[must_use]
    pub fn check_win(&self, grid: &Grid) -> bool {
        self.builders.iter().any(|b| {
            let tile = grid.tile(b.coord());
            tile.level() == MAX_LEVEL && !tile.is_domed()
        })
    }

    /// True when no builder has a legal move to any of its neighbors.
    #[must_use]
    pub fn check_lose(&self, grid: &Grid) -> bool {
        !self.builders.iter().any(|b| b.has_legal_move(grid))
    }
}
