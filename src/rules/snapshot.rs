//! Read-only match snapshots and their console rendering.
//!
//! A `Snapshot` is plain data: every tile's level, dome flag and occupant,
//! the remaining supply, the phase and the history. It never borrows from
//! the match, so a shell can hold on to it, compare two of them, or
//! serialize it.
//!
//! ## Rendering
//!
//! `Display` draws the board with `y` growing upward and `x` to the right.
//! Each cell shows the level digit (or `D` for a dome) wrapped in the
//! occupant's brackets:
//!
//! | Builder | Brackets |
//! |---------|----------|
//! | Player 1, builder 1 | `(` `)` |
//! | Player 1, builder 2 | `[` `]` |
//! | Player 2, builder 1 | `{` `}` |
//! | Player 2, builder 2 | `<` `>` |

use im::Vector;
use serde::{Deserialize, Serialize};

use super::engine::Phase;
use crate::board::grid::check_layout;
use crate::board::tile::check_height;
use crate::board::Grid;
use crate::core::action::ActionRecord;
use crate::core::config::PieceCounts;
use crate::core::coord::{Coord, GRID_SIZE};
use crate::core::error::{Error, Result};
use crate::core::player::{BuilderId, BuilderNumber, PlayerId};

/// State of one tile at snapshot time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileView {
    pub coord: Coord,
    pub level: u8,
    pub domed: bool,
    pub occupant: Option<BuilderId>,
}

/// Everything a renderer needs, detached from the live match.
///
/// Deserializing checks the board shape (25 tiles in `Coord::index` order,
/// heights within range), so every `Snapshot` renders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotRepr")]
pub struct Snapshot {
    tiles: Vec<TileView>,
    remaining: PieceCounts,
    phase: Phase,
    round: u32,
    history: Vector<ActionRecord>,
}

#[derive(Deserialize)]
struct SnapshotRepr {
    tiles: Vec<TileView>,
    remaining: PieceCounts,
    phase: Phase,
    round: u32,
    history: Vector<ActionRecord>,
}

impl TryFrom<SnapshotRepr> for Snapshot {
    type Error = Error;

    fn try_from(repr: SnapshotRepr) -> Result<Self> {
        check_layout(repr.tiles.iter().map(|t| t.coord), "snapshot")?;
        for tile in &repr.tiles {
            check_height(tile.coord, tile.level, tile.domed)?;
        }
        Ok(Self {
            tiles: repr.tiles,
            remaining: repr.remaining,
            phase: repr.phase,
            round: repr.round,
            history: repr.history,
        })
    }
}

impl Snapshot {
    pub(crate) fn capture(
        grid: &Grid,
        phase: Phase,
        round: u32,
        history: Vector<ActionRecord>,
    ) -> Self {
        let tiles = grid
            .tiles()
            .map(|t| TileView {
                coord: t.coord(),
                level: t.level(),
                domed: t.is_domed(),
                occupant: t.occupant(),
            })
            .collect();
        Self {
            tiles,
            remaining: grid.remaining_pieces(),
            phase,
            round,
            history,
        }
    }

    /// The view of one tile.
    #[must_use]
    pub fn tile(&self, coord: Coord) -> &TileView {
        &self.tiles[coord.index()]
    }

    /// Tiles, x-major (`Coord::index` order).
    #[must_use]
    pub fn tiles(&self) -> &[TileView] {
        &self.tiles
    }

    /// Remaining pieces `[L1, L2, L3, Dome]`.
    #[must_use]
    pub fn remaining(&self) -> PieceCounts {
        self.remaining
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// `"Remaining Tiles: Level 1-16 Level 2-14 Level 3-12 Dome-14"`.
    #[must_use]
    pub fn remaining_line(&self) -> String {
        let mut line = String::from("Remaining Tiles:");
        for (kind, count) in self.remaining.iter() {
            line.push_str(&format!(" {}-{}", kind, count));
        }
        line
    }
}

/// Opening and closing bracket for a tile's occupant.
fn brackets(occupant: Option<BuilderId>) -> (char, char) {
    match occupant {
        None => (' ', ' '),
        Some(BuilderId { player, number }) => match (player, number) {
            (PlayerId::ONE, BuilderNumber::FIRST) => ('(', ')'),
            (PlayerId::ONE, _) => ('[', ']'),
            (_, BuilderNumber::FIRST) => ('{', '}'),
            _ => ('<', '>'),
        },
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  y  ")?;
        for y in (1..=GRID_SIZE).rev() {
            write!(f, "  {}  ", y)?;
            for x in 1..=GRID_SIZE {
                let Some(coord) = Coord::try_new(x, y) else {
                    continue;
                };
                let tile = self.tile(coord);
                let (open, close) = brackets(tile.occupant);
                let height = if tile.domed {
                    'D'
                } else {
                    char::from(b'0' + tile.level)
                };
                write!(f, " {}{}{} ", open, height, close)?;
            }
            writeln!(f)?;
        }
        write!(f, "     ")?;
        for x in 1..=GRID_SIZE {
            write!(f, "  {}  ", x)?;
        }
        write!(f, "  x  ")
    }
}
