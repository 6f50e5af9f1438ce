//! Winning line invariant.

use super::Invariant;
use crate::engine::GameState;

/// Invariant: a recorded winning line has three cells holding one mark, and
/// only a finished game has one.
pub struct WinningLineConsistent;

impl Invariant<GameState> for WinningLineConsistent {
    fn holds(state: &GameState) -> bool {
        let line = state.winning_line();
        if line.is_empty() {
            return true;
        }
        if line.len() != 3 || *state.active() {
            return false;
        }
        let first = state.board().get(line[0]);
        first.mark().is_some() && line.iter().all(|c| state.board().get(*c) == first)
    }

    fn description() -> &'static str {
        "Winning line is three equal marks on a finished board"
    }
}
