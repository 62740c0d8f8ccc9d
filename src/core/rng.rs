//! Deterministic random number generation for the random opening.
//!
//! The rules themselves are fully deterministic; randomness is only used to
//! pick starting tiles when a match is set up with `Match::random_setup`.
//! The same seed always yields the same opening.
//!
//! ```
//! use not_santorini::core::GameRng;
//!
//! let a = GameRng::new(7).distinct_tiles(4);
//! let b = GameRng::new(7).distinct_tiles(4);
//! assert_eq!(a, b);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::coord::Coord;

/// Seeded RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Pick `count` distinct board tiles in random order.
    ///
    /// Panics if `count` exceeds the number of tiles.
    pub fn distinct_tiles(&mut self, count: usize) -> Vec<Coord> {
        let mut tiles: Vec<Coord> = Coord::all().collect();
        assert!(count <= tiles.len(), "Cannot pick {} distinct tiles", count);
        self.shuffle(&mut tiles);
        tiles.truncate(count);
        tiles
    }
}
