//! Committed actions and match history.
//!
//! Every state change the match accepts is recorded as an `ActionRecord`:
//! builder placements during setup, then alternating moves and builds.
//! Query-only calls never produce records.

use serde::{Deserialize, Serialize};

use super::config::PieceKind;
use super::coord::Coord;
use super::player::BuilderId;

/// A committed game action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// A builder was put on its starting tile.
    Place { builder: BuilderId, at: Coord },
    /// A builder moved between two tiles.
    Move {
        builder: BuilderId,
        from: Coord,
        to: Coord,
    },
    /// A builder added a piece to a neighboring tile.
    Build {
        builder: BuilderId,
        at: Coord,
        piece: PieceKind,
    },
}

impl Action {
    /// The builder that performed this action.
    #[must_use]
    pub fn builder(&self) -> BuilderId {
        match *self {
            Action::Place { builder, .. }
            | Action::Move { builder, .. }
            | Action::Build { builder, .. } => builder,
        }
    }
}

/// A recorded action with ordering metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action taken.
    pub action: Action,

    /// Round number when the action was taken (0 during setup).
    pub round: u32,

    /// Position in the whole match history.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(action: Action, round: u32, sequence: u32) -> Self {
        Self {
            action,
            round,
            sequence,
        }
    }
}
