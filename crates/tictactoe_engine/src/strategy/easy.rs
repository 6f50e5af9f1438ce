//! Easy: uniformly random among the empty cells.

use crate::rules::available_moves;
use crate::types::{Board, Coord};
use rand::Rng;
use rand::seq::SliceRandom;

/// Picks a random empty cell.
///
/// On an empty board the previous match's opening cell is excluded so that
/// successive openings vary.
pub(super) fn choose<R: Rng + ?Sized>(board: &Board, previous_opening: Option<Coord>, rng: &mut R) -> Option<Coord> {
    let mut moves = available_moves(board);
    if board.occupied() == 0
        && let Some(previous) = previous_opening
    {
        let filtered: Vec<_> = moves.iter().copied().filter(|m| *m != previous).collect();
        if !filtered.is_empty() {
            moves = filtered;
        }
    }
    moves.choose(rng).copied()
}
