//! Parity test deciding whether a board can reach the goal.
//!
//! Horizontal moves change neither the inversion count nor the blank's row.
//! A vertical move jumps a tile over `size - 1` others, so on odd boards the
//! inversion parity is preserved, and on even boards the parity of
//! `inversions + blank row` is. Two boards are mutually reachable exactly when
//! that parity agrees.

use crate::goal::Goal;
use crate::puzzle::Board;

/// Count out-of-order pairs among the non-blank tiles, in row-major order.
pub fn count_inversions(flattened: &[u32]) -> usize {
    flattened
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != 0)
        .map(|(i, &val)| {
            flattened[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < val)
                .count()
        })
        .sum()
}

fn parity(board: &Board) -> usize {
    let inversions = count_inversions(board.tiles());
    if board.size() % 2 == 1 {
        inversions % 2
    } else {
        (inversions + board.zero_coordinate().0) % 2
    }
}

/// Whether `board` can be slid into `goal`.
///
/// For the usual goal (blank in the last cell) this is the textbook rule: odd
/// boards need an even inversion count, even boards need
/// `inversions + blank row from top` to be odd.
pub fn is_solvable(board: &Board, goal: &Goal) -> bool {
    parity(board) == parity(goal.board())
}
