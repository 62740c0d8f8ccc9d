//! # not-santorini
//!
//! Rules engine for a two-player builder game on a 5x5 grid.
//!
//! Each player has two builders. A turn is one move followed by one build
//! with the builder that moved. Builders climb at most one level per move;
//! stepping onto a level-3 tile wins, and a player who cannot move at the
//! start of their turn loses.
//!
//! ## Design
//!
//! 1. **Shell-agnostic**: the engine never prints or reads input. Shells
//!    drive a `Match` and render `Snapshot`s.
//!
//! 2. **Refusals are values**: an unreachable tile or an empty supply is a
//!    normal outcome reported in `MoveResult`/`BuildResult`. Only contract
//!    violations (wrong player, wrong phase, off-board input) are `Err`.
//!
//! 3. **Single ownership**: the `Grid` owns tiles and the piece supply;
//!    builders refer to tiles by `Coord`, tiles to builders by `BuilderId`.
//!
//! ## Modules
//!
//! - `core`: coordinates, player and builder IDs, configuration, actions,
//!   errors, RNG
//! - `board`: tiles, the grid, and the shared piece inventory
//! - `rules`: builder legality, players, the match state machine, snapshots
//!
//! ## Example
//!
//! ```
//! use not_santorini::{BuilderNumber, Coord, Match, PlayerId, RulesConfig};
//!
//! let mut game = Match::with_placements(
//!     RulesConfig::standard(),
//!     [(1, 1), (5, 5), (1, 5), (5, 1)],
//! )
//! .unwrap();
//!
//! let moved = game.submit_move(PlayerId::ONE, 2, 2).unwrap();
//! assert!(moved.applied());
//! let built = game.submit_build(PlayerId::ONE, BuilderNumber::FIRST, 3, 3).unwrap();
//! assert!(built.applied());
//! assert_eq!(game.snapshot().tile(Coord::new(3, 3).unwrap()).level, 1);
//! ```

pub mod board;
pub mod core;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord,
    BuilderId, BuilderNumber, PlayerId, PlayerMap,
    Coord, GRID_SIZE,
    Error, Rejection, Result,
    GameRng,
    PieceCounts, PieceKind, RulesConfig, MAX_LEVEL,
};

pub use crate::board::{Grid, Inventory, Tile};

pub use crate::rules::{
    Builder, Player,
    BuildResult, GameResult, Match, MoveResult, Phase, PlacementResult, WinReason,
    Snapshot, TileView,
};
