//! Player and builder identification, plus per-player data storage.
//!
//! ## PlayerId
//!
//! The game is strictly two-player. Player numbers are 1-based, the way
//! they are announced at the console ("Player 1", "Player 2").
//!
//! ## BuilderId
//!
//! Each player owns exactly two builders, numbered 1 and 2. A `BuilderId`
//! is the pair `(player, number)` and is what tiles record as their occupant.
//!
//! ## PlayerMap
//!
//! Per-player storage with O(1) access by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::Error;

/// Player identifier: player 1 or player 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player who moves first.
    pub const ONE: PlayerId = PlayerId(1);
    /// The player who moves second.
    pub const TWO: PlayerId = PlayerId(2);

    /// Create a player ID from its 1-based number.
    ///
    /// Returns `None` for anything other than 1 or 2.
    #[must_use]
    pub const fn new(num: u8) -> Option<Self> {
        match num {
            1 | 2 => Some(Self(num)),
            _ => None,
        }
    }

    /// The 1-based player number.
    #[must_use]
    pub const fn num(self) -> u8 {
        self.0
    }

    /// 0-based index for array storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self.0 {
            1 => Self::TWO,
            _ => Self::ONE,
        }
    }

    /// Both players in turn order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [Self::ONE, Self::TWO].into_iter()
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = Error;

    fn try_from(num: u8) -> Result<Self, Error> {
        Self::new(num).ok_or_else(|| Error::InvalidData {
            what: "player",
            detail: format!("{num} is not 1 or 2"),
        })
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Which of a player's two builders: 1 or 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct BuilderNumber(u8);

impl BuilderNumber {
    pub const FIRST: BuilderNumber = BuilderNumber(1);
    pub const SECOND: BuilderNumber = BuilderNumber(2);

    /// Create a builder number from its 1-based value.
    #[must_use]
    pub const fn new(num: u8) -> Option<Self> {
        match num {
            1 | 2 => Some(Self(num)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn num(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn all() -> impl Iterator<Item = BuilderNumber> {
        [Self::FIRST, Self::SECOND].into_iter()
    }
}

impl TryFrom<u8> for BuilderNumber {
    type Error = Error;

    fn try_from(num: u8) -> Result<Self, Error> {
        Self::new(num).ok_or_else(|| Error::InvalidData {
            what: "builder number",
            detail: format!("{num} is not 1 or 2"),
        })
    }
}

impl std::fmt::Display for BuilderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a single builder on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuilderId {
    pub player: PlayerId,
    pub number: BuilderNumber,
}

impl BuilderId {
    #[must_use]
    pub const fn new(player: PlayerId, number: BuilderNumber) -> Self {
        Self { player, number }
    }

    /// All four builders in placement order: P1B1, P1B2, P2B1, P2B2.
    pub fn all() -> impl Iterator<Item = BuilderId> {
        PlayerId::all().flat_map(|p| BuilderNumber::all().map(move |n| BuilderId::new(p, n)))
    }
}

impl std::fmt::Display for BuilderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} builder {}", self.player, self.number)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use not_santorini::core::{PlayerId, PlayerMap};
///
/// let mut moves: PlayerMap<u32> = PlayerMap::with_value(0);
/// moves[PlayerId::TWO] += 1;
/// assert_eq!(moves[PlayerId::ONE], 0);
/// assert_eq!(moves[PlayerId::TWO], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ONE), factory(PlayerId::TWO)],
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().zip(self.data.iter())
    }
}

impl<T> From<[T; 2]> for PlayerMap<T> {
    /// Entries in turn order: `[player 1, player 2]`.
    fn from(data: [T; 2]) -> Self {
        Self { data }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
