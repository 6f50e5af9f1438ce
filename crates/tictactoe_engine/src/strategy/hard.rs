//! Hard: exhaustive minimax with alpha-beta pruning.
//!
//! Terminal scores are `WIN - depth` for the side that completed a line, so
//! faster wins and slower losses are preferred. Draws score zero.

use crate::rules::{available_moves, find_winner};
use crate::types::{Board, Cell, Coord, Mark};
use tracing::instrument;

const WIN: i32 = 10;
const INF: i32 = 1_000;

/// Result of perfect play from a position, seen from one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Forecast {
    /// The side can force a win.
    Win,
    /// The other side can force a win.
    Loss,
    /// Best play on both sides ends in a draw.
    Draw,
    /// No computer party, so there is no side to forecast for.
    Unknown,
}

/// Picks the best move for `mark`.
///
/// When several moves share the best score the first in row-major order is
/// kept. The root comparison is strict, so a sibling whose score was only
/// bounded by pruning can never displace it.
#[instrument(skip(board))]
pub(super) fn choose(board: &Board, mark: Mark) -> Option<Coord> {
    let mut probe = board.clone();
    let mut best: Option<(Coord, i32)> = None;

    for coord in available_moves(board) {
        let alpha = best.map_or(-INF, |(_, score)| score);
        probe.set(coord, Cell::Occupied(mark));
        let score = -negamax(&mut probe, mark.opponent(), 1, -INF, -alpha);
        probe.set(coord, Cell::Empty);

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((coord, score));
        }
    }

    best.map(|(coord, _)| coord)
}

/// Forecasts the outcome of perfect play from `board` with `to_move` on
/// move, from the point of view of `perspective`.
#[instrument(skip(board))]
pub fn forecast(board: &Board, to_move: Mark, perspective: Mark) -> Forecast {
    let mut probe = board.clone();
    let value = negamax(&mut probe, to_move, 0, -INF, INF);
    let value = if to_move == perspective { value } else { -value };
    match value {
        v if v > 0 => Forecast::Win,
        v if v < 0 => Forecast::Loss,
        _ => Forecast::Draw,
    }
}

/// Value of the position for `to_move`.
fn negamax(board: &mut Board, to_move: Mark, depth: i32, mut alpha: i32, beta: i32) -> i32 {
    if let Some(line) = find_winner(board) {
        let score = WIN - depth;
        return if line.mark == to_move { score } else { -score };
    }

    let moves = available_moves(board);
    if moves.is_empty() {
        return 0;
    }

    let mut best = -INF;
    for coord in moves {
        board.set(coord, Cell::Occupied(to_move));
        let score = -negamax(board, to_move.opponent(), depth + 1, -beta, -alpha);
        board.set(coord, Cell::Empty);

        best = best.max(score);
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Cell = Cell::Occupied(Mark::X);
    const O: Cell = Cell::Occupied(Mark::O);
    const E: Cell = Cell::Empty;

    #[test]
    fn test_empty_board_opens_first_cell() {
        // Every opening draws under perfect play, so row-major order decides.
        assert_eq!(choose(&Board::new(), Mark::X), Some(Coord::at(1, 1)));
    }

    #[test]
    fn test_answers_corner_opening_with_center() {
        let board = Board::from_rows([[X, E, E], [E, E, E], [E, E, E]]);
        assert_eq!(choose(&board, Mark::O), Some(Coord::CENTER));
    }

    #[test]
    fn test_answers_center_opening_with_corner() {
        let board = Board::from_rows([[E, E, E], [E, X, E], [E, E, E]]);
        assert_eq!(choose(&board, Mark::O), Some(Coord::at(1, 1)));
    }

    #[test]
    fn test_prefers_immediate_win() {
        let board = Board::from_rows([[E, O, E], [E, O, E], [X, X, E]]);
        assert_eq!(choose(&board, Mark::X), Some(Coord::at(3, 3)));
    }

    #[test]
    fn test_blocks_when_it_cannot_win() {
        let board = Board::from_rows([[X, X, E], [E, O, E], [E, E, E]]);
        assert_eq!(choose(&board, Mark::O), Some(Coord::at(1, 3)));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board = Board::from_rows([[X, O, X], [X, O, O], [O, X, X]]);
        assert_eq!(choose(&board, Mark::X), None);
    }

    #[test]
    fn test_forecast() {
        assert_eq!(forecast(&Board::new(), Mark::X, Mark::X), Forecast::Draw);

        // X to move forks with 3-1, threatening 1-3 and 2-1.
        let fork = Board::from_rows([[X, O, E], [E, X, E], [E, E, O]]);
        assert_eq!(forecast(&fork, Mark::X, Mark::X), Forecast::Win);
        assert_eq!(forecast(&fork, Mark::X, Mark::O), Forecast::Loss);

        let won = Board::from_rows([[O, O, O], [X, X, E], [X, E, E]]);
        assert_eq!(forecast(&won, Mark::X, Mark::O), Forecast::Win);
    }
}
