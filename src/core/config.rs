//! Piece kinds and rules configuration.
//!
//! A match is configured at startup with a `RulesConfig`. The only tunable
//! today is the number of pieces of each kind in the shared supply; the
//! standard set is 16 level-1 blocks, 14 level-2 blocks, 12 level-3 blocks
//! and 14 domes.
//!
//! Piece kinds are indexed generically (`PieceKind::index`) so that counts
//! never assume anything beyond "one counter per kind".

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Highest buildable level before a dome is placed.
pub const MAX_LEVEL: u8 = 3;

/// A kind of building piece in the shared supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    Level1,
    Level2,
    Level3,
    Dome,
}

impl PieceKind {
    /// All kinds in counter order `[L1, L2, L3, Dome]`.
    pub const ALL: [PieceKind; 4] = [
        PieceKind::Level1,
        PieceKind::Level2,
        PieceKind::Level3,
        PieceKind::Dome,
    ];

    /// Counter index of this kind.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The piece needed to advance a tile currently at `level`.
    ///
    /// Level 0 needs a level-1 block, ..., level 3 needs a dome. The current
    /// level is used directly as the counter index.
    #[must_use]
    pub const fn for_level(level: u8) -> Option<PieceKind> {
        match level {
            0 => Some(PieceKind::Level1),
            1 => Some(PieceKind::Level2),
            2 => Some(PieceKind::Level3),
            MAX_LEVEL => Some(PieceKind::Dome),
            _ => None,
        }
    }

    /// Human-readable name as shown in the remaining-pieces line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PieceKind::Level1 => "Level 1",
            PieceKind::Level2 => "Level 2",
            PieceKind::Level3 => "Level 3",
            PieceKind::Dome => "Dome",
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One counter per `PieceKind`, in `[L1, L2, L3, Dome]` order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceCounts(pub [u8; 4]);

impl PieceCounts {
    /// The standard supply: `[16, 14, 12, 14]`.
    pub const STANDARD: PieceCounts = PieceCounts([16, 14, 12, 14]);

    #[must_use]
    pub const fn new(level1: u8, level2: u8, level3: u8, dome: u8) -> Self {
        Self([level1, level2, level3, dome])
    }

    /// Iterate over (kind, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PieceKind, u8)> + '_ {
        PieceKind::ALL.iter().map(move |&k| (k, self.0[k.index()]))
    }
}

impl Index<PieceKind> for PieceCounts {
    type Output = u8;

    fn index(&self, kind: PieceKind) -> &Self::Output {
        &self.0[kind.index()]
    }
}

impl IndexMut<PieceKind> for PieceCounts {
    fn index_mut(&mut self, kind: PieceKind) -> &mut Self::Output {
        &mut self.0[kind.index()]
    }
}

/// Complete rules configuration for one match.
///
/// ```
/// use not_santorini::core::{PieceKind, RulesConfig};
///
/// let config = RulesConfig::standard().with_cap(PieceKind::Dome, 2);
/// assert_eq!(config.piece_caps[PieceKind::Level1], 16);
/// assert_eq!(config.piece_caps[PieceKind::Dome], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Number of pieces of each kind available for the whole match.
    pub piece_caps: PieceCounts,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl RulesConfig {
    /// The standard rules with the standard piece supply.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            piece_caps: PieceCounts::STANDARD,
        }
    }

    /// Set the cap for a single piece kind.
    #[must_use]
    pub fn with_cap(mut self, kind: PieceKind, cap: u8) -> Self {
        self.piece_caps[kind] = cap;
        self
    }

    /// Replace all piece caps.
    #[must_use]
    pub fn with_caps(mut self, caps: PieceCounts) -> Self {
        self.piece_caps = caps;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_for_level() {
        assert_eq!(PieceKind::for_level(0), Some(PieceKind::Level1));
        assert_eq!(PieceKind::for_level(1), Some(PieceKind::Level2));
        assert_eq!(PieceKind::for_level(2), Some(PieceKind::Level3));
        assert_eq!(PieceKind::for_level(3), Some(PieceKind::Dome));
        assert_eq!(PieceKind::for_level(4), None);
    }

    #[test]
    fn test_piece_index_matches_level() {
        for level in 0..=MAX_LEVEL {
            let kind = PieceKind::for_level(level).unwrap();
            assert_eq!(kind.index(), level as usize);
        }
    }

    #[test]
    fn test_standard_caps() {
        let config = RulesConfig::standard();
        assert_eq!(config.piece_caps, PieceCounts::new(16, 14, 12, 14));
        assert_eq!(RulesConfig::default(), config);
    }

    #[test]
    fn test_config_builder() {
        let config = RulesConfig::standard()
            .with_cap(PieceKind::Level2, 1)
            .with_cap(PieceKind::Dome, 0);
        assert_eq!(config.piece_caps, PieceCounts::new(16, 1, 12, 0));

        let config = config.with_caps(PieceCounts::new(1, 1, 1, 1));
        assert_eq!(config.piece_caps[PieceKind::Level3], 1);
    }

    #[test]
    fn test_config_serialization() {
        let config = RulesConfig::standard().with_cap(PieceKind::Dome, 3);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RulesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
