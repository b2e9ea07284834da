//! Piece placement during the setup phases.
//!
//! Home pieces go on the placing player's own half, neutral pieces on the
//! placer's *opponent's* half. Both are two-cell footprints from the
//! orientation table, may not overlap anything, and may not touch the
//! divider column.

use std::ops::RangeInclusive;

use crate::board::{footprint, Board, CellState, Coord, Footprint, Orientation, Owner, COLS, DIVIDER_COL};
use crate::core::{GameRng, Player, RuleError};

/// Minimum Manhattan distance kept between automatically placed neutral
/// pieces and any existing neutral cell.
pub const MIN_NEUTRAL_SPACING: i32 = 4;

/// Attempt budget for one automatic neutral placement.
const MAX_PLACEMENT_ATTEMPTS: usize = 2000;

/// Columns of a player's own half.
#[must_use]
pub fn home_half(player: Player) -> RangeInclusive<i32> {
    match player {
        Player::One => 0..=DIVIDER_COL - 1,
        Player::Two => DIVIDER_COL + 1..=COLS as i32 - 1,
    }
}

/// Columns of a player's opponent's half.
#[must_use]
pub fn opponent_half(player: Player) -> RangeInclusive<i32> {
    home_half(player.opponent())
}

/// Validate one footprint cell against bounds, divider, half and occupancy.
fn check_setup_cell(
    board: &Board,
    coord: Coord,
    half: &RangeInclusive<i32>,
    half_label: &str,
) -> Result<(), RuleError> {
    if coord.col == DIVIDER_COL {
        return Err(RuleError::placement(format!(
            "cell {coord} touches the divider column"
        )));
    }
    if !board.contains(coord) {
        return Err(RuleError::placement(format!("cell {coord} is out of bounds")));
    }
    if !half.contains(&coord.col) {
        return Err(RuleError::placement(format!(
            "cell {coord} is outside {half_label}"
        )));
    }
    if !board.get(coord)?.is_empty() {
        return Err(RuleError::Occupied {
            row: coord.row,
            col: coord.col,
        });
    }
    Ok(())
}

fn write_footprint(board: &mut Board, cells: Footprint, owner: Owner) -> Result<(), RuleError> {
    for (coord, polarity) in cells {
        board.set(coord, CellState::occupied(owner, polarity))?;
    }
    Ok(())
}

/// Place a player's home piece.
///
/// The footprint must lie fully inside `player`'s own half, off the divider,
/// on empty cells. Writes owner = `player` with the "+"/"-" pair and returns
/// the footprint. The one-home-piece-per-game rule is enforced by the
/// session, which owns the per-player home record.
pub fn place_home(
    board: &mut Board,
    player: Player,
    anchor: Coord,
    orientation: Orientation,
) -> Result<Footprint, RuleError> {
    let cells = footprint(anchor, orientation);
    let half = home_half(player);
    let label = format!("{player}'s half");
    for (coord, _) in cells {
        check_setup_cell(board, coord, &half, &label)?;
    }
    write_footprint(board, cells, Owner::Player(player))?;
    Ok(cells)
}

/// Place a neutral piece on behalf of `placer`.
///
/// Identical footprint rule to [`place_home`], but owner = neutral and the
/// piece must lie on the *opponent's* half.
pub fn place_neutral(
    board: &mut Board,
    placer: Player,
    anchor: Coord,
    orientation: Orientation,
) -> Result<Footprint, RuleError> {
    let cells = footprint(anchor, orientation);
    let half = opponent_half(placer);
    let label = format!("{}'s half", placer.opponent());
    for (coord, _) in cells {
        check_setup_cell(board, coord, &half, &label)?;
    }
    write_footprint(board, cells, Owner::Neutral)?;
    Ok(cells)
}

/// True when `coord` is within [`MIN_NEUTRAL_SPACING`] (Manhattan) of an
/// existing neutral cell.
fn too_close_to_neutral(board: &Board, coord: Coord) -> bool {
    board.iter().any(|(other, cell)| {
        cell.is_neutral()
            && (other.row - coord.row).abs() + (other.col - coord.col).abs() < MIN_NEUTRAL_SPACING
    })
}

/// Automatically place one neutral piece on `placer`'s opponent's half.
///
/// Draws random anchors and orientations until a placement passes the
/// footprint rule and keeps [`MIN_NEUTRAL_SPACING`] from every existing
/// neutral cell. Returns `None` when the attempt budget runs out (the board
/// is effectively full for that half).
pub fn auto_place_neutral(
    board: &mut Board,
    rng: &mut GameRng,
    placer: Player,
) -> Option<Footprint> {
    let half = opponent_half(placer);
    let cols: Vec<i32> = half.collect();

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let orientation = *rng.choose(&Orientation::ALL)?;
        let row = rng.gen_range_usize(0..crate::board::ROWS) as i32;
        let col = *rng.choose(&cols)?;
        let anchor = Coord::new(row, col);

        let cells = footprint(anchor, orientation);
        if cells
            .iter()
            .any(|&(coord, _)| too_close_to_neutral(board, coord))
        {
            continue;
        }
        if place_neutral(board, placer, anchor, orientation).is_ok() {
            return Some(cells);
        }
    }
    None
}
