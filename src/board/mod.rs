//! Board storage and piece geometry.
//!
//! The board is a pure state container: bounds-checked get/set of cell
//! ownership and polarity, nothing else. All rule knowledge (halves,
//! footprints, movement) lives in the `rules` module.

pub mod grid;
pub mod piece;

pub use grid::{Board, CellState, Coord, Owner, Polarity, COLS, DIVIDER_COL, ROWS};
pub use piece::{footprint, Footprint, Orientation};
