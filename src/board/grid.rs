//! Grid storage: cell ownership and polarity.
//!
//! ## Layout
//!
//! A fixed `ROWS` × `COLS` grid (8×15). Column [`DIVIDER_COL`] is the
//! central divider separating the two players' halves; the setup rules keep
//! it unoccupied, the grid itself does not care.
//!
//! ## Invariant
//!
//! A cell has a polarity exactly when it has a non-empty owner. The grid
//! stores whatever it is told; the placement and movement rules only ever
//! write consistent cell states.

use serde::{Deserialize, Serialize};

use crate::core::{Player, RuleError};

/// Number of board rows.
pub const ROWS: usize = 8;

/// Number of board columns.
pub const COLS: usize = 15;

/// The central divider column, unusable during setup.
pub const DIVIDER_COL: i32 = 7;

/// A board coordinate.
///
/// Signed so that unit-step arithmetic can leave the board; every access
/// through [`Board`] is bounds-checked. Serializes as `[row, col]`, and the
/// derived ordering is row-major.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "[i32; 2]", from = "[i32; 2]")]
pub struct Coord {
    /// Row index.
    pub row: i32,
    /// Column index.
    pub col: i32,
}

impl Coord {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The coordinate one step away in direction `(dr, dc)`.
    #[must_use]
    pub const fn step(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// The four orthogonal neighbors, probed in the fixed order
    /// down, up, right, left. Connectivity searches rely on this order
    /// being stable for deterministic discovery.
    #[must_use]
    pub const fn neighbors(self) -> [Coord; 4] {
        [
            self.step(1, 0),
            self.step(-1, 0),
            self.step(0, 1),
            self.step(0, -1),
        ]
    }
}

impl From<Coord> for [i32; 2] {
    fn from(coord: Coord) -> Self {
        [coord.row, coord.col]
    }
}

impl From<[i32; 2]> for Coord {
    fn from([row, col]: [i32; 2]) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Magnetic polarity of an occupied cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    /// The "+" pole.
    #[serde(rename = "+")]
    Plus,
    /// The "-" pole.
    #[serde(rename = "-")]
    Minus,
}

impl Polarity {
    /// The opposite pole.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Polarity::Plus => Polarity::Minus,
            Polarity::Minus => Polarity::Plus,
        }
    }

    /// Wire symbol, `"+"` or `"-"`.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Polarity::Plus => "+",
            Polarity::Minus => "-",
        }
    }
}

/// Cell ownership. Wire codes: 0 empty, 1/2 players, 3 neutral.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Owner {
    /// Unoccupied.
    Empty,
    /// Owned by a player.
    Player(Player),
    /// A neutral piece, capturable by either side.
    Neutral,
}

impl Owner {
    /// Wire code for this owner.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Owner::Empty => 0,
            Owner::Player(player) => player.number(),
            Owner::Neutral => 3,
        }
    }
}

impl From<Owner> for u8 {
    fn from(owner: Owner) -> Self {
        owner.code()
    }
}

impl TryFrom<u8> for Owner {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Owner::Empty),
            1 => Ok(Owner::Player(Player::One)),
            2 => Ok(Owner::Player(Player::Two)),
            3 => Ok(Owner::Neutral),
            other => Err(format!("invalid owner code {other}")),
        }
    }
}

/// The full state of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellState {
    /// Who occupies the cell.
    pub owner: Owner,
    /// Polarity tag; `None` exactly when the cell is empty.
    pub polarity: Option<Polarity>,
}

impl CellState {
    /// An unoccupied cell.
    pub const EMPTY: CellState = CellState {
        owner: Owner::Empty,
        polarity: None,
    };

    /// An occupied cell.
    #[must_use]
    pub const fn occupied(owner: Owner, polarity: Polarity) -> Self {
        Self {
            owner,
            polarity: Some(polarity),
        }
    }

    /// Is the cell unoccupied?
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self.owner, Owner::Empty)
    }

    /// Is the cell neutral?
    #[must_use]
    pub const fn is_neutral(self) -> bool {
        matches!(self.owner, Owner::Neutral)
    }

    /// Is the cell owned by `player`?
    #[must_use]
    pub fn is_owned_by(self, player: Player) -> bool {
        self.owner == Owner::Player(player)
    }
}

impl Default for CellState {
    fn default() -> Self {
        CellState::EMPTY
    }
}

/// The 8×15 grid. A pure state container: bounds-checked get/set, row-major
/// iteration and ownership counts, no rule knowledge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<CellState>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![CellState::EMPTY; ROWS * COLS],
        }
    }

    /// Is the coordinate on the board?
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        (0..ROWS as i32).contains(&coord.row) && (0..COLS as i32).contains(&coord.col)
    }

    fn index(&self, coord: Coord) -> Result<usize, RuleError> {
        if self.contains(coord) {
            Ok(coord.row as usize * COLS + coord.col as usize)
        } else {
            Err(RuleError::OutOfBounds {
                row: coord.row,
                col: coord.col,
            })
        }
    }

    /// Read a cell, failing with `OutOfBounds` off the board.
    pub fn get(&self, coord: Coord) -> Result<CellState, RuleError> {
        Ok(self.cells[self.index(coord)?])
    }

    /// Write a cell, failing with `OutOfBounds` off the board.
    pub fn set(&mut self, coord: Coord, state: CellState) -> Result<(), RuleError> {
        let idx = self.index(coord)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Clear a cell back to empty.
    pub fn clear(&mut self, coord: Coord) -> Result<(), RuleError> {
        self.set(coord, CellState::EMPTY)
    }

    /// Iterate all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        self.cells.iter().enumerate().map(|(i, &state)| {
            let coord = Coord::new((i / COLS) as i32, (i % COLS) as i32);
            (coord, state)
        })
    }

    /// Number of cells owned by `player`.
    #[must_use]
    pub fn count_owned_by(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.is_owned_by(player))
            .count()
    }

    /// Number of neutral cells.
    #[must_use]
    pub fn count_neutral(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_neutral()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
