//! Error and rejection types.
//!
//! Two families:
//!
//! - `Rejection`: why a move, build or placement is not legal right now.
//!   These are ordinary outcomes of play (the console re-prompts on them)
//!   and travel inside result values, never as `Err`.
//! - `Error`: contract violations. The caller skipped a legality check,
//!   acted out of phase, or handed the core an off-board coordinate.
//!   Deserializing data that breaks a board invariant is also an `Error`
//!   (`InvalidData`), raised before any value is built.

use thiserror::Error;

use super::config::PieceKind;
use super::coord::Coord;
use super::player::{BuilderId, BuilderNumber, PlayerId};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Why a target tile was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum Rejection {
    #[error("that tile is off the board")]
    OutOfBounds,
    #[error("that is the builder's own tile")]
    SameTile,
    #[error("that tile is not next to the builder")]
    NotAdjacent,
    #[error("that tile has been domed")]
    Domed,
    #[error("that tile is occupied")]
    Occupied,
    #[error("that tile is more than one level higher")]
    TooHigh,
    #[error("no {0} pieces remain")]
    PieceExhausted(PieceKind),
}

/// Core contract violations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("coordinate ({x}, {y}) is outside the board")]
    OutOfBounds { x: i32, y: i32 },

    #[error("{builder} cannot move to {target}: {reason}")]
    IllegalMove {
        builder: BuilderId,
        target: Coord,
        reason: Rejection,
    },

    #[error("cannot build on {target}: {reason}")]
    IllegalBuild { target: Coord, reason: Rejection },

    #[error("no {kind} pieces remain")]
    InventoryExhausted { kind: PieceKind },

    #[error("{player} has no legal move")]
    NoLegalMove { player: PlayerId },

    #[error("cannot {action} during {phase}")]
    WrongPhase {
        action: &'static str,
        phase: String,
    },

    #[error("it is {expected}'s turn, not {actual}'s")]
    WrongPlayer {
        expected: PlayerId,
        actual: PlayerId,
    },

    #[error("builder {actual} must not build; builder {expected} moved this turn")]
    WrongBuilder {
        expected: BuilderNumber,
        actual: BuilderNumber,
    },

    #[error("no ambiguous move is waiting to be resolved")]
    NoPendingMove,

    #[error("builder {builder} was not one of the options for this move")]
    NotAnOption { builder: BuilderNumber },

    #[error("cannot place a builder on {target}: {reason}")]
    IllegalPlacement { target: Coord, reason: Rejection },

    #[error("invalid {what}: {detail}")]
    InvalidData { what: &'static str, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        assert_eq!(Rejection::Domed.to_string(), "that tile has been domed");
        assert_eq!(
            Rejection::PieceExhausted(PieceKind::Level2).to_string(),
            "no Level 2 pieces remain"
        );
    }

    #[test]
    fn test_error_messages() {
        let err = Error::OutOfBounds { x: 0, y: 6 };
        assert_eq!(err.to_string(), "coordinate (0, 6) is outside the board");

        let err = Error::IllegalMove {
            builder: BuilderId::new(PlayerId::ONE, BuilderNumber::SECOND),
            target: Coord::new(2, 3).unwrap(),
            reason: Rejection::TooHigh,
        };
        assert_eq!(
            err.to_string(),
            "Player 1 builder 2 cannot move to (2, 3): that tile is more than one level higher"
        );
    }
}
