//! Connected-cluster discovery.
//!
//! A cluster is the maximal 4-connected set of cells sharing one player as
//! owner. Polarity plays no part in membership; it only governs interaction
//! with neutral cells during movement. Clusters are computed on demand and
//! never persisted.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::board::{Board, Coord};
use crate::core::{Player, RuleError};

/// Cells of one cluster, in discovery order.
///
/// Most clusters are small (a piece is two cells); the inline capacity keeps
/// the common case off the heap.
pub type Cluster = SmallVec<[Coord; 8]>;

/// Resolve the cluster containing `seed`.
///
/// Fails with `NoPieceAtCell` when the seed cell is not owned by `player`
/// (and `OutOfBounds` when it is off the board). Otherwise performs a
/// breadth-first search over 4-neighbors owned by `player` and returns the
/// connected set in deterministic discovery order: the seed first, then
/// neighbors probed down, up, right, left. Pure read, no mutation.
pub fn find_cluster(board: &Board, player: Player, seed: Coord) -> Result<Cluster, RuleError> {
    if !board.get(seed)?.is_owned_by(player) {
        return Err(RuleError::NoPieceAtCell {
            player,
            row: seed.row,
            col: seed.col,
        });
    }

    let mut cluster = Cluster::new();
    let mut visited = FxHashSet::default();
    let mut queue = VecDeque::new();

    visited.insert(seed);
    queue.push_back(seed);

    while let Some(coord) = queue.pop_front() {
        cluster.push(coord);

        for neighbor in coord.neighbors() {
            if !board.contains(neighbor) || visited.contains(&neighbor) {
                continue;
            }
            if board.get(neighbor)?.is_owned_by(player) {
                visited.insert(neighbor);
                queue.push_back(neighbor);
            }
        }
    }

    Ok(cluster)
}
