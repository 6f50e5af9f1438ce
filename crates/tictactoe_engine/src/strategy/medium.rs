//! Medium: take a win, otherwise block, otherwise center, corner, anything.

use crate::rules::{available_moves, find_winner};
use crate::types::{Board, Cell, Coord, Mark};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

/// Returns the first empty cell (row-major) that completes a line for `mark`.
fn immediate_win(board: &Board, mark: Mark) -> Option<Coord> {
    available_moves(board).into_iter().find(|&coord| {
        let mut probe = board.clone();
        probe.set(coord, Cell::Occupied(mark));
        find_winner(&probe).is_some_and(|line| line.mark == mark)
    })
}

pub(super) fn choose<R: Rng + ?Sized>(board: &Board, mark: Mark, rng: &mut R) -> Option<Coord> {
    if let Some(win) = immediate_win(board, mark) {
        debug!(%win, "Taking winning move");
        return Some(win);
    }
    if let Some(block) = immediate_win(board, mark.opponent()) {
        debug!(%block, "Blocking opponent line");
        return Some(block);
    }
    if board.is_empty(Coord::CENTER) {
        return Some(Coord::CENTER);
    }
    let moves = available_moves(board);
    let corners: Vec<_> = moves.iter().copied().filter(|m| m.is_corner()).collect();
    if let Some(corner) = corners.choose(rng) {
        return Some(*corner);
    }
    moves.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const X: Cell = Cell::Occupied(Mark::X);
    const O: Cell = Cell::Occupied(Mark::O);
    const E: Cell = Cell::Empty;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(11)
    }

    #[test]
    fn test_wins_before_blocking() {
        // O can win at 2-3; X threatens 1-3.
        let board = Board::from_rows([[X, X, E], [O, O, E], [X, E, E]]);
        assert_eq!(choose(&board, Mark::O, &mut rng()), Some(Coord::at(2, 3)));
    }

    #[test]
    fn test_blocks_opponent_line() {
        let board = Board::from_rows([[X, X, E], [E, O, E], [E, E, E]]);
        assert_eq!(choose(&board, Mark::O, &mut rng()), Some(Coord::at(1, 3)));
    }

    #[test]
    fn test_takes_center_when_quiet() {
        let board = Board::from_rows([[X, E, E], [E, E, E], [E, E, E]]);
        assert_eq!(choose(&board, Mark::O, &mut rng()), Some(Coord::CENTER));
    }

    #[test]
    fn test_prefers_corners_after_center() {
        let board = Board::from_rows([[E, E, E], [E, X, E], [E, E, E]]);
        for seed in 0..50 {
            let chosen = choose(&board, Mark::O, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
            assert!(chosen.is_corner(), "{} is not a corner", chosen);
        }
    }

    #[test]
    fn test_falls_back_to_edges() {
        // Center and corners taken, no line open for either side.
        let board = Board::from_rows([[X, E, O], [O, X, X], [X, E, O]]);
        for seed in 0..20 {
            let chosen = choose(&board, Mark::O, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
            assert!(chosen == Coord::at(1, 2) || chosen == Coord::at(3, 2));
        }
    }

    #[test]
    fn test_immediate_win_detects_diagonal() {
        let board = Board::from_rows([[O, E, E], [E, O, E], [E, E, E]]);
        assert_eq!(immediate_win(&board, Mark::O), Some(Coord::at(3, 3)));
        assert_eq!(immediate_win(&board, Mark::X), None);
    }
}
