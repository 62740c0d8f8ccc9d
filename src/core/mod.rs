//! Core types: coordinates, players and builders, configuration, actions,
//! errors and RNG.
//!
//! Nothing here knows about tiles or legality; the board and rules modules
//! build on these.

pub mod action;
pub mod config;
pub mod coord;
pub mod error;
pub mod player;
pub mod rng;

pub use action::{Action, ActionRecord};
pub use config::{PieceCounts, PieceKind, RulesConfig, MAX_LEVEL};
pub use coord::{Coord, GRID_SIZE, NEIGHBOR_OFFSETS, TILE_COUNT};
pub use error::{Error, Rejection, Result};
pub use player::{BuilderId, BuilderNumber, PlayerId, PlayerMap};
pub use rng::GameRng;
