//! Rule violation taxonomy.
//!
//! Every engine operation either fully applies or fails with one of these
//! variants, leaving state untouched. All failures are recoverable: the
//! engine never panics on a rule violation, and the boundary layer is
//! responsible for translating variants into its own protocol (the
//! [`Display`](std::fmt::Display) message is suitable as a user-facing
//! `message` field).

use derive_more::{Display, Error};

use super::player::Player;

/// A rejected operation.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum RuleError {
    /// Cell coordinates fall outside the board.
    #[display("cell ({row}, {col}) is out of bounds")]
    OutOfBounds {
        /// Offending row.
        row: i32,
        /// Offending column.
        col: i32,
    },

    /// Target cell is already occupied.
    #[display("cell ({row}, {col}) is already occupied")]
    Occupied {
        /// Offending row.
        row: i32,
        /// Offending column.
        col: i32,
    },

    /// A piece placement broke a setup rule.
    #[display("invalid placement: {reason}")]
    InvalidPlacement {
        /// Which rule was broken.
        reason: String,
    },

    /// The seed cell is not owned by the acting player.
    #[display("{player} has no piece at ({row}, {col})")]
    NoPieceAtCell {
        /// The acting player.
        player: Player,
        /// Seed row.
        row: i32,
        /// Seed column.
        col: i32,
    },

    /// A cluster move collided with a non-capturable cell.
    #[display("move blocked at ({row}, {col})")]
    Blocked {
        /// First blocking row.
        row: i32,
        /// First blocking column.
        col: i32,
    },

    /// A rotation was malformed or collided with a non-capturable cell.
    #[display("invalid rotation: {reason}")]
    InvalidRotation {
        /// Which rule was broken.
        reason: String,
    },

    /// The requested cell is not a legal steal target.
    #[display("cell ({row}, {col}) cannot be stolen")]
    NotStealable {
        /// Requested row.
        row: i32,
        /// Requested column.
        col: i32,
    },

    /// The operation is not legal in the current phase or turn sub-state.
    #[display("wrong phase: {reason}")]
    WrongPhase {
        /// Why the operation is out of order.
        reason: String,
    },

    /// The game has ended; only `reset` is accepted.
    #[display("the game is over")]
    GameOver,
}

impl RuleError {
    /// Shorthand for an [`InvalidPlacement`](RuleError::InvalidPlacement).
    #[must_use]
    pub fn placement(reason: impl Into<String>) -> Self {
        RuleError::InvalidPlacement {
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`InvalidRotation`](RuleError::InvalidRotation).
    #[must_use]
    pub fn rotation(reason: impl Into<String>) -> Self {
        RuleError::InvalidRotation {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`WrongPhase`](RuleError::WrongPhase).
    #[must_use]
    pub fn wrong_phase(reason: impl Into<String>) -> Self {
        RuleError::WrongPhase {
            reason: reason.into(),
        }
    }
}
