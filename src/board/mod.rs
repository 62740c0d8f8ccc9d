//! The physical board: tiles, the shared piece supply, and the grid that
//! owns both.
//!
//! These types only store and mutate state. They never decide whether a
//! move or build is legal; that lives in `rules`.

pub mod grid;
pub mod inventory;
pub mod tile;

pub use grid::Grid;
pub use inventory::Inventory;
pub use tile::Tile;
