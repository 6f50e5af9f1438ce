//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Cell, Coord, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The 8 winning lines in scan order: rows top to bottom, columns left to
/// right, then the main and anti diagonals.
///
/// The first completed line in this order is the one reported.
pub const LINES: [[Coord; 3]; 8] = [
    // Rows
    [Coord::at(1, 1), Coord::at(1, 2), Coord::at(1, 3)],
    [Coord::at(2, 1), Coord::at(2, 2), Coord::at(2, 3)],
    [Coord::at(3, 1), Coord::at(3, 2), Coord::at(3, 3)],
    // Columns
    [Coord::at(1, 1), Coord::at(2, 1), Coord::at(3, 1)],
    [Coord::at(1, 2), Coord::at(2, 2), Coord::at(3, 2)],
    [Coord::at(1, 3), Coord::at(2, 3), Coord::at(3, 3)],
    // Diagonals
    [Coord::at(1, 1), Coord::at(2, 2), Coord::at(3, 3)],
    [Coord::at(1, 3), Coord::at(2, 2), Coord::at(3, 1)],
];

/// A line fully occupied by one mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine {
    /// The mark that owns the line.
    pub mark: Mark,
    /// The three cells of the line, in scan order.
    pub cells: [Coord; 3],
}

/// Finds the first line fully occupied by one mark.
///
/// Returns `None` if no line is complete.
#[instrument(skip(board))]
pub fn find_winner(board: &Board) -> Option<WinningLine> {
    LINES.iter().find_map(|&[a, b, c]| {
        let cell = board.get(a);
        match cell {
            Cell::Occupied(mark) if cell == board.get(b) && cell == board.get(c) => {
                Some(WinningLine {
                    mark,
                    cells: [a, b, c],
                })
            }
            _ => None,
        }
    })
}
