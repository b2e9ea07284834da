//! Cluster translation and rotation with polarity-driven capture.
//!
//! ## Occupancy rule
//!
//! For a translation, every cell's target must be one of:
//! - unoccupied,
//! - part of the moving cluster itself, or
//! - a neutral cell whose polarity is opposite to the incoming cell's
//!   (capture by displacement).
//!
//! Anything else — an opponent cell, a player cell outside the cluster, or a
//! neutral of matching polarity — blocks the whole move. Validation runs to
//! completion before any mutation, so a failed move leaves the board
//! byte-for-byte unchanged.
//!
//! ## Contact capture
//!
//! After the cluster lands, every neutral cell 4-adjacent to a moved cell
//! with opposite polarity converts to the mover's ownership, keeping its own
//! polarity. Conversion happens only for cells touched during this single
//! step; converted cells do not trigger further conversions.

use rustc_hash::FxHashSet;

use crate::board::{Board, CellState, Coord, Orientation, Owner, Polarity};
use crate::core::{Player, RuleError};

use super::cluster::{find_cluster, Cluster};

/// The four unit steps a cluster may take.
const UNIT_STEPS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Result of a successful move or rotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The re-resolved cluster after the step, converted cells included.
    pub cells: Cluster,
    /// Neutral cells converted to the mover's ownership, row-major order.
    ///
    /// Contact-captured cells keep their own polarity. Displacement-captured
    /// cells are overwritten by the arriving cell and therefore hold its
    /// polarity; consumers should re-read the board rather than assume the
    /// pre-capture polarity.
    pub converted: Vec<Coord>,
}

/// Verify every supplied cell is on the board and owned by `player`.
fn check_ownership(board: &Board, player: Player, cells: &[Coord]) -> Result<(), RuleError> {
    for &cell in cells {
        if !board.get(cell)?.is_owned_by(player) {
            return Err(RuleError::NoPieceAtCell {
                player,
                row: cell.row,
                col: cell.col,
            });
        }
    }
    Ok(())
}

/// Can a cell moving with `polarity` capture the cell `target` holds?
fn capturable(target: CellState, polarity: Polarity) -> bool {
    target.is_neutral() && target.polarity == Some(polarity.opposite())
}

/// Convert neutral cells 4-adjacent to `moved` cells when their polarity
/// opposes the adjacent moved cell. Appends converted coordinates to `out`.
fn contact_capture(
    board: &mut Board,
    player: Player,
    moved: &[Coord],
    out: &mut Vec<Coord>,
) -> Result<(), RuleError> {
    for &cell in moved {
        let Some(polarity) = board.get(cell)?.polarity else {
            continue;
        };
        for neighbor in cell.neighbors() {
            if !board.contains(neighbor) {
                continue;
            }
            let state = board.get(neighbor)?;
            if capturable(state, polarity) {
                board.set(
                    neighbor,
                    CellState {
                        owner: Owner::Player(player),
                        polarity: state.polarity,
                    },
                )?;
                out.push(neighbor);
            }
        }
    }
    Ok(())
}

/// Translate a cluster one unit step.
///
/// Validates the occupancy rule for every cell, then applies atomically:
/// sources vacated, each cell rewritten at its target with polarity
/// preserved, displaced and contact-captured neutrals converted to the
/// mover. Returns the new cluster (re-resolved, so conversions join it) and
/// the converted cells in row-major order.
pub fn move_cluster(
    board: &mut Board,
    player: Player,
    cells: &[Coord],
    dr: i32,
    dc: i32,
) -> Result<MoveOutcome, RuleError> {
    if cells.is_empty() {
        return Err(RuleError::placement("cluster is empty"));
    }
    if !UNIT_STEPS.contains(&(dr, dc)) {
        return Err(RuleError::placement(format!(
            "({dr}, {dc}) is not a unit step"
        )));
    }
    check_ownership(board, player, cells)?;

    let cluster_set: FxHashSet<Coord> = cells.iter().copied().collect();
    let mut converted = Vec::new();

    // Validation pass: nothing is mutated until every target checks out.
    for &cell in cells {
        let target = cell.step(dr, dc);
        if cluster_set.contains(&target) {
            continue;
        }
        let state = board.get(target)?;
        if state.is_empty() {
            continue;
        }
        let Some(polarity) = board.get(cell)?.polarity else {
            continue;
        };
        if capturable(state, polarity) {
            converted.push(target);
            continue;
        }
        return Err(RuleError::Blocked {
            row: target.row,
            col: target.col,
        });
    }

    // Apply: vacate sources, then write each cell at its target.
    let moving: Vec<(Coord, CellState)> = cells
        .iter()
        .map(|&cell| board.get(cell).map(|state| (cell, state)))
        .collect::<Result<_, _>>()?;

    for &(cell, _) in &moving {
        board.clear(cell)?;
    }

    let mut landed = Vec::with_capacity(moving.len());
    for (cell, state) in moving {
        let target = cell.step(dr, dc);
        board.set(target, state)?;
        landed.push(target);
    }

    contact_capture(board, player, &landed, &mut converted)?;
    converted.sort();

    let cells = find_cluster(board, player, landed[0])?;
    Ok(MoveOutcome { cells, converted })
}

/// Rotate a two-cell piece in place.
///
/// The "+" cell is the anchor; the "-" cell swings to the next orientation's
/// offset. The relocated cell obeys the same occupancy/capture rule as a
/// translation, except that collisions fail with `InvalidRotation`.
pub fn rotate_cluster(
    board: &mut Board,
    player: Player,
    cells: &[Coord],
) -> Result<MoveOutcome, RuleError> {
    if cells.len() != 2 {
        return Err(RuleError::rotation("only a two-cell piece can rotate"));
    }
    check_ownership(board, player, cells)?;

    let polarities = [board.get(cells[0])?.polarity, board.get(cells[1])?.polarity];
    let (anchor, minus) = match polarities {
        [Some(Polarity::Plus), Some(Polarity::Minus)] => (cells[0], cells[1]),
        [Some(Polarity::Minus), Some(Polarity::Plus)] => (cells[1], cells[0]),
        _ => return Err(RuleError::rotation("piece must carry one + and one - cell")),
    };

    let orientation = Orientation::from_offset(minus.row - anchor.row, minus.col - anchor.col)
        .ok_or_else(|| RuleError::rotation("piece cells are not adjacent"))?;

    let (dr, dc) = orientation.next().offset();
    let target = anchor.step(dr, dc);
    let state = board.get(target)?;

    let mut converted = Vec::new();
    if capturable(state, Polarity::Minus) {
        converted.push(target);
    } else if !state.is_empty() {
        return Err(RuleError::rotation(format!(
            "collides with occupied cell {target}"
        )));
    }

    let minus_state = board.get(minus)?;
    board.clear(minus)?;
    board.set(target, minus_state)?;

    contact_capture(board, player, &[target], &mut converted)?;
    converted.sort();

    let cells = find_cluster(board, player, anchor)?;
    Ok(MoveOutcome { cells, converted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::place_home;

    fn put(board: &mut Board, row: i32, col: i32, owner: Owner, polarity: Polarity) {
        board
            .set(Coord::new(row, col), CellState::occupied(owner, polarity))
            .unwrap();
    }

    fn home_piece(board: &mut Board, player: Player, row: i32, col: i32) -> Vec<Coord> {
        let cells = place_home(board, player, Coord::new(row, col), Orientation::Deg0).unwrap();
        cells.iter().map(|&(coord, _)| coord).collect()
    }

    #[test]
    fn test_move_into_empty_space() {
        let mut board = Board::new();
        let cells = home_piece(&mut board, Player::One, 3, 0);

        let outcome = move_cluster(&mut board, Player::One, &cells, 1, 0).unwrap();
        assert!(outcome.converted.is_empty());
        assert_eq!(outcome.cells.len(), 2);
        assert!(outcome.cells.contains(&Coord::new(4, 0)));
        assert!(outcome.cells.contains(&Coord::new(4, 1)));

        // Sources vacated, polarities preserved.
        assert!(board.get(Coord::new(3, 0)).unwrap().is_empty());
        assert_eq!(
            board.get(Coord::new(4, 0)).unwrap().polarity,
            Some(Polarity::Plus)
        );
        assert_eq!(
            board.get(Coord::new(4, 1)).unwrap().polarity,
            Some(Polarity::Minus)
        );
    }

    #[test]
    fn test_move_then_inverse_restores_board() {
        let mut board = Board::new();
        let cells = home_piece(&mut board, Player::One, 3, 2);
        let before = board.clone();

        let outcome = move_cluster(&mut board, Player::One, &cells, 0, 1).unwrap();
        assert!(outcome.converted.is_empty());

        let back: Vec<Coord> = outcome.cells.to_vec();
        move_cluster(&mut board, Player::One, &back, 0, -1).unwrap();

        assert_eq!(board, before);
    }

    #[test]
    fn test_blocked_by_opponent_leaves_board_unchanged() {
        let mut board = Board::new();
        let cells = home_piece(&mut board, Player::One, 3, 2);
        put(&mut board, 3, 4, Owner::Player(Player::Two), Polarity::Plus);
        let before = board.clone();

        let err = move_cluster(&mut board, Player::One, &cells, 0, 1).unwrap_err();
        assert_eq!(err, RuleError::Blocked { row: 3, col: 4 });
        assert_eq!(board, before);
    }

    #[test]
    fn test_blocked_by_matching_polarity_neutral() {
        let mut board = Board::new();
        let cells = home_piece(&mut board, Player::One, 3, 2);
        // The "-" cell at (3,3) would move onto a "-" neutral: matching
        // polarity blocks.
        put(&mut board, 3, 4, Owner::Neutral, Polarity::Minus);
        let before = board.clone();

        let err = move_cluster(&mut board, Player::One, &cells, 0, 1).unwrap_err();
        assert_eq!(err, RuleError::Blocked { row: 3, col: 4 });
        assert_eq!(board, before);
    }

    #[test]
    fn test_displacement_capture() {
        let mut board = Board::new();
        let cells = home_piece(&mut board, Player::One, 3, 2);
        // The "-" cell at (3,3) moves onto a "+" neutral: capture.
        put(&mut board, 3, 4, Owner::Neutral, Polarity::Plus);

        let outcome = move_cluster(&mut board, Player::One, &cells, 0, 1).unwrap();
        assert_eq!(outcome.converted, vec![Coord::new(3, 4)]);
        assert_eq!(board.count_neutral(), 0);

        // The arriving "-" cell overwrites the displaced neutral, so the
        // converted coordinate now carries the mover's polarity.
        let landed = board.get(Coord::new(3, 4)).unwrap();
        assert!(landed.is_owned_by(Player::One));
        assert_eq!(landed.polarity, Some(Polarity::Minus));
    }

    #[test]
    fn test_contact_capture_converts_in_place() {
        let mut board = Board::new();
        let cells = home_piece(&mut board, Player::One, 3, 2);
        // After stepping right, the "-" cell at (3,4) touches the "+"
        // neutral at (3,5).
        put(&mut board, 3, 5, Owner::Neutral, Polarity::Plus);

        let owned_before = board.count_owned_by(Player::One);
        let neutral_before = board.count_neutral();

        let outcome = move_cluster(&mut board, Player::One, &cells, 0, 1).unwrap();

        assert_eq!(outcome.converted, vec![Coord::new(3, 5)]);
        assert_eq!(board.count_neutral(), neutral_before - 1);
        assert_eq!(board.count_owned_by(Player::One), owned_before + 1);

        // Polarity of the converted cell is unchanged.
        let converted = board.get(Coord::new(3, 5)).unwrap();
        assert_eq!(converted.owner, Owner::Player(Player::One));
        assert_eq!(converted.polarity, Some(Polarity::Plus));

        // The converted cell joins the returned cluster.
        assert!(outcome.cells.contains(&Coord::new(3, 5)));
        assert_eq!(outcome.cells.len(), 3);
    }

    #[test]
    fn test_no_chained_capture() {
        let mut board = Board::new();
        let cells = home_piece(&mut board, Player::One, 3, 2);
        // A "+" neutral in contact range, and a "-" neutral behind it that
        // only the converted cell would touch.
        put(&mut board, 3, 5, Owner::Neutral, Polarity::Plus);
        put(&mut board, 3, 6, Owner::Neutral, Polarity::Minus);

        let outcome = move_cluster(&mut board, Player::One, &cells, 0, 1).unwrap();

        assert_eq!(outcome.converted, vec![Coord::new(3, 5)]);
        assert!(board.get(Coord::new(3, 6)).unwrap().is_neutral());
    }

    #[test]
    fn test_matching_polarity_neutral_alongside_is_ignored() {
        let mut board = Board::new();
        let cells = home_piece(&mut board, Player::One, 3, 2);
        // A "-" neutral next to where the "-" cell lands: no conversion, no
        // block (it is not in the path).
        put(&mut board, 4, 3, Owner::Neutral, Polarity::Minus);

        let outcome = move_cluster(&mut board, Player::One, &cells, 0, 1).unwrap();
        assert!(outcome.converted.is_empty());
        assert!(board.get(Coord::new(4, 3)).unwrap().is_neutral());
    }

    #[test]
    fn test_cannot_move_opponent_cells() {
        let mut board = Board::new();
        home_piece(&mut board, Player::One, 3, 2);

        let err = move_cluster(
            &mut board,
            Player::Two,
            &[Coord::new(3, 2), Coord::new(3, 3)],
            1,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, RuleError::NoPieceAtCell { .. }));
    }

    #[test]
    fn test_move_off_board_fails() {
        let mut board = Board::new();
        let cells = home_piece(&mut board, Player::One, 0, 2);
        let before = board.clone();

        let err = move_cluster(&mut board, Player::One, &cells, -1, 0).unwrap_err();
        assert!(matches!(err, RuleError::OutOfBounds { .. }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_non_unit_step_rejected() {
        let mut board = Board::new();
        let cells = home_piece(&mut board, Player::One, 3, 2);

        assert!(move_cluster(&mut board, Player::One, &cells, 0, 2).is_err());
        assert!(move_cluster(&mut board, Player::One, &cells, 1, 1).is_err());
        assert!(move_cluster(&mut board, Player::One, &cells, 0, 0).is_err());
    }

    #[test]
    fn test_rotate_steps_through_orientations() {
        let mut board = Board::new();
        // Orientation 0: "+" at (3,2), "-" at (3,3).
        let cells = home_piece(&mut board, Player::One, 3, 2);

        // 0 -> 90: "-" swings to (4,2).
        let outcome = rotate_cluster(&mut board, Player::One, &cells).unwrap();
        assert!(outcome.converted.is_empty());
        assert!(board.get(Coord::new(3, 3)).unwrap().is_empty());
        assert_eq!(
            board.get(Coord::new(4, 2)).unwrap().polarity,
            Some(Polarity::Minus)
        );

        // 90 -> 180: "-" swings to (3,1).
        let cells: Vec<Coord> = outcome.cells.to_vec();
        rotate_cluster(&mut board, Player::One, &cells).unwrap();
        assert_eq!(
            board.get(Coord::new(3, 1)).unwrap().polarity,
            Some(Polarity::Minus)
        );

        // Anchor never moves.
        assert_eq!(
            board.get(Coord::new(3, 2)).unwrap().polarity,
            Some(Polarity::Plus)
        );
    }

    #[test]
    fn test_rotate_blocked_by_occupied_cell() {
        let mut board = Board::new();
        let cells = home_piece(&mut board, Player::One, 3, 2);
        put(&mut board, 4, 2, Owner::Player(Player::Two), Polarity::Plus);
        let before = board.clone();

        let err = rotate_cluster(&mut board, Player::One, &cells).unwrap_err();
        assert!(matches!(err, RuleError::InvalidRotation { .. }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_rotate_captures_opposite_neutral() {
        let mut board = Board::new();
        let cells = home_piece(&mut board, Player::One, 3, 2);
        // The "-" cell swings onto a "+" neutral at (4,2).
        put(&mut board, 4, 2, Owner::Neutral, Polarity::Plus);

        let outcome = rotate_cluster(&mut board, Player::One, &cells).unwrap();
        assert_eq!(outcome.converted, vec![Coord::new(4, 2)]);
        assert_eq!(board.count_neutral(), 0);
    }

    #[test]
    fn test_rotate_requires_two_cells() {
        let mut board = Board::new();
        put(&mut board, 3, 2, Owner::Player(Player::One), Polarity::Plus);

        let err = rotate_cluster(&mut board, Player::One, &[Coord::new(3, 2)]).unwrap_err();
        assert!(matches!(err, RuleError::InvalidRotation { .. }));
    }

    #[test]
    fn test_rotate_off_board_fails() {
        let mut board = Board::new();
        // "+" at (7,2), "-" at (7,3); rotating swings the "-" to (8,2).
        let cells = home_piece(&mut board, Player::One, 7, 2);

        let err = rotate_cluster(&mut board, Player::One, &cells).unwrap_err();
        assert!(matches!(err, RuleError::OutOfBounds { .. }));
    }
}
