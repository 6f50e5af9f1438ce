//! Legal move enumeration.

use crate::types::{Board, Coord};

/// Returns every empty coordinate in ascending row-major order.
///
/// Strategies rely on this order as their deterministic tie-break.
pub fn available_moves(board: &Board) -> Vec<Coord> {
    Coord::ALL
        .iter()
        .copied()
        .filter(|coord| board.is_empty(*coord))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, Mark};

    #[test]
    fn test_all_moves_on_empty_board() {
        assert_eq!(available_moves(&Board::new()), Coord::ALL.to_vec());
    }

    #[test]
    fn test_occupied_cells_are_skipped_in_order() {
        let mut board = Board::new();
        board.set(Coord::at(1, 2), Cell::Occupied(Mark::X));
        board.set(Coord::CENTER, Cell::Occupied(Mark::O));
        let moves = available_moves(&board);
        assert_eq!(moves.len(), 7);
        assert_eq!(moves[0], Coord::at(1, 1));
        assert_eq!(moves[1], Coord::at(1, 3));
        assert_eq!(moves[2], Coord::at(2, 1));
        assert_eq!(moves[3], Coord::at(2, 3));
    }
}
