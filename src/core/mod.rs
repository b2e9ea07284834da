//! Core engine types: players, deterministic RNG, error taxonomy.
//!
//! These are the building blocks the board, rules and session modules share.

pub mod error;
pub mod player;
pub mod rng;

pub use error::RuleError;
pub use player::Player;
pub use rng::{GameRng, GameRngState};
