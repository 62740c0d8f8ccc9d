//! Game rules: builder legality, players, and the match state machine.
//!
//! - `builder`: where a single builder may move or build.
//! - `player`: a player's two builders, win and lose checks.
//! - `engine`: `Match`, which sequences setup and turns.
//! - `snapshot`: detached, serializable views of a match.
//!
//! Shells only need `Match`; the lower layers are public for tests,
//! benchmarks and analysis tools.

pub mod builder;
pub mod engine;
pub mod player;
pub mod snapshot;

pub use builder::{Builder, Destinations};
pub use engine::{
    BuildResult, GameResult, Match, MoveResult, Phase, PlacementResult, WinReason,
};
pub use player::{BuilderOptions, MoveAttempt, Player};
pub use snapshot::{Snapshot, TileView};
