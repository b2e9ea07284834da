//! Serializable snapshots for hosting layers.
//!
//! Views are cheap, owned copies built on demand; they carry no references
//! into the session and serialize with `serde` as plain JSON-friendly data.

use serde::Serialize;

use crate::board::{Board, COLS, ROWS};
use crate::core::Player;
use crate::session::{Phase, Winner};

/// Owner and polarity grids in row-major nested lists.
///
/// Owners use the numeric cell codes (0 empty, 1 and 2 the players,
/// 3 neutral); polarities are `"+"`, `"-"` or `""` for empty cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardView {
    /// Owner codes, `board[row][col]`.
    pub board: Vec<Vec<u8>>,
    /// Polarity symbols, `polarities[row][col]`.
    pub polarities: Vec<Vec<String>>,
}

impl BoardView {
    /// Snapshot a board.
    #[must_use]
    pub fn new(board: &Board) -> Self {
        let mut codes = vec![vec![0_u8; COLS]; ROWS];
        let mut polarities = vec![vec![String::new(); COLS]; ROWS];

        for (coord, cell) in board.iter() {
            let (row, col) = (coord.row as usize, coord.col as usize);
            codes[row][col] = cell.owner.code();
            if let Some(polarity) = cell.polarity {
                polarities[row][col] = polarity.symbol().to_string();
            }
        }

        Self {
            board: codes,
            polarities,
        }
    }
}

/// Turn-machine snapshot alongside [`BoardView`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StateView {
    /// Current phase.
    pub phase: Phase,
    /// The player whose turn it is.
    pub current_player: Player,
    /// Completed main-phase turns.
    pub main_turns: u32,
    /// The turn cap.
    pub max_main_turns: u32,
    /// Set once the phase is `ended`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
}
