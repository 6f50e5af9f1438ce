//! Move counter invariants.

use super::Invariant;
use crate::engine::GameState;

/// Invariant: the move counter equals the number of occupied cells.
pub struct MoveCountMatchesBoard;

impl Invariant<GameState> for MoveCountMatchesBoard {
    fn holds(state: &GameState) -> bool {
        *state.move_count() as usize == state.board().occupied()
    }

    fn description() -> &'static str {
        "Move count equals the number of occupied cells"
    }
}

/// Invariant: at most 9 plies.
pub struct MoveCountBounded;

impl Invariant<GameState> for MoveCountBounded {
    fn holds(state: &GameState) -> bool {
        *state.move_count() <= 9
    }

    fn description() -> &'static str {
        "Move count never exceeds 9"
    }
}
