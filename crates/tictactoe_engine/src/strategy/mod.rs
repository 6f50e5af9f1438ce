//! Computer move selection.
//!
//! Each difficulty is a free function from a board and the mark to move to
//! one coordinate. Randomness is always injected so a seeded generator makes
//! every choice reproducible.

mod easy;
mod hard;
mod medium;

pub use hard::{Forecast, forecast};

use crate::config::Difficulty;
use crate::types::{Board, Coord, Mark};
use rand::Rng;
use tracing::{debug, instrument};

/// Selects a move for `mark` using the strategy for `difficulty`.
///
/// `previous_opening` is the computer's opening move of the preceding match;
/// only the Easy strategy consults it. Returns `None` when the board has no
/// empty cell.
#[instrument(skip(board, rng), fields(occupied = board.occupied()))]
pub fn select_move<R: Rng + ?Sized>(
    difficulty: Difficulty,
    board: &Board,
    mark: Mark,
    previous_opening: Option<Coord>,
    rng: &mut R,
) -> Option<Coord> {
    let chosen = match difficulty {
        Difficulty::Easy => easy::choose(board, previous_opening, rng),
        Difficulty::Medium => medium::choose(board, mark, rng),
        Difficulty::Hard => hard::choose(board, mark),
    };
    debug!(?chosen, "Strategy selected move");
    chosen
}
