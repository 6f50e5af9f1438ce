//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! board storage so the state machine and the computer strategies share one
//! definition of a win, a draw and a legal move.

mod draw;
mod moves;
mod win;

pub use draw::is_full;
pub use moves::available_moves;
pub use win::{LINES, WinningLine, find_winner};
