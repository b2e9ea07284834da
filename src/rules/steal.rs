//! Bonus single-cell captures after rolling a six.
//!
//! A steal converts one neutral cell adjacent to the roller's pieces. The
//! session arms stealing only when the most recent roll is a six; this
//! module just answers "which cells?" and performs the conversion.

use crate::board::{Board, CellState, Coord, Owner};
use crate::core::{Player, RuleError};

/// All neutral cells 4-adjacent to any cell owned by `player`.
///
/// Scans the board row-major, so the result is deduplicated and ordered
/// without further work.
#[must_use]
pub fn steal_targets(board: &Board, player: Player) -> Vec<Coord> {
    board
        .iter()
        .filter(|&(coord, cell)| {
            cell.is_neutral()
                && coord.neighbors().iter().any(|&neighbor| {
                    board.contains(neighbor)
                        && board
                            .get(neighbor)
                            .is_ok_and(|state| state.is_owned_by(player))
                })
        })
        .map(|(coord, _)| coord)
        .collect()
}

/// Convert a single neutral cell to `player`'s ownership.
///
/// Fails with `NotStealable` unless `target` is currently in
/// [`steal_targets`]. The cell keeps its polarity.
pub fn steal(board: &mut Board, player: Player, target: Coord) -> Result<Coord, RuleError> {
    if !steal_targets(board, player).contains(&target) {
        return Err(RuleError::NotStealable {
            row: target.row,
            col: target.col,
        });
    }

    let state = board.get(target)?;
    board.set(
        target,
        CellState {
            owner: Owner::Player(player),
            polarity: state.polarity,
        },
    )?;
    Ok(target)
}
