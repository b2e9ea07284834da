//! # polarity
//!
//! Rules engine for a two-player, turn-based magnetic-polarity board game.
//!
//! The board is an 8×15 grid split by a central divider column. Each player
//! places one two-cell "home" piece on their own half, neutral pieces are
//! seeded on each side's opposing half, and players then alternate rolling a
//! die and moving or rotating connected groups of owned cells ("clusters"),
//! converting opposite-polarity neutral cells on contact. After a fixed
//! number of main-phase turns the player owning more cells wins.
//!
//! ## Design Principles
//!
//! 1. **Engine only**: HTTP routing, rendering, persistence and AI strategy
//!    are the hosting layer's problem. The crate exposes operations plus
//!    serializable views of the board and state.
//!
//! 2. **Validate-then-apply**: every operation either fully applies or fully
//!    fails with a [`RuleError`]; a failed call leaves state untouched.
//!
//! 3. **Deterministic**: all randomness (dice, automatic neutral placement)
//!    flows through a seeded [`GameRng`], so whole games replay bit-for-bit.
//!
//! ## Modules
//!
//! - `core`: Player identity, deterministic RNG, error taxonomy
//! - `board`: Grid storage, cell state, piece orientation table
//! - `rules`: Placement, cluster resolution, movement, steal logic
//! - `session`: Phase/turn state machine and wire views

pub mod core;
pub mod board;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{GameRng, GameRngState, Player, RuleError};

pub use crate::board::{
    Board, CellState, Coord, Orientation, Owner, Polarity, COLS, DIVIDER_COL, ROWS,
};

pub use crate::rules::{
    find_cluster, move_cluster, place_home, place_neutral, rotate_cluster, steal, steal_targets,
    Cluster, MoveOutcome,
};

pub use crate::session::{
    BoardView, GameSession, Phase, PlacementOutcome, RollOutcome, SessionBuilder, StateView,
    StealOutcome, TurnMoveOutcome, Winner,
};
