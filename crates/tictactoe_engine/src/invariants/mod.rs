//! First-class invariants over the engine's game state.
//!
//! Invariants are logical properties that must hold after every transition.
//! The engine checks them in debug builds; tests can check them directly.

mod move_count;
mod winning_line;

pub use move_count::{MoveCountBounded, MoveCountMatchesBoard};
pub use winning_line::WinningLineConsistent;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        collect::<S, I1>(state, &mut violations);
        collect::<S, I2>(state, &mut violations);
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        collect::<S, I1>(state, &mut violations);
        collect::<S, I2>(state, &mut violations);
        collect::<S, I3>(state, &mut violations);
        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }
}

/// Every invariant of [`GameState`](crate::GameState).
pub type EngineInvariants = (MoveCountMatchesBoard, MoveCountBounded, WinningLineConsistent);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameEngine;
    use crate::types::{Cell, Mark};

    const X: Cell = Cell::Occupied(Mark::X);
    const O: Cell = Cell::Occupied(Mark::O);
    const E: Cell = Cell::Empty;

    #[test]
    fn test_fresh_state_satisfies_all() {
        let engine = GameEngine::builder().seed(3).build();
        assert_eq!(EngineInvariants::check_all(engine.state()), Ok(()));
    }

    #[test]
    fn test_won_state_satisfies_all() {
        let mut engine = GameEngine::builder().seed(3).build();
        for (row, col) in [(1, 1), (2, 1), (1, 2), (2, 2), (1, 3)] {
            engine.play_move(row, col);
        }
        assert!(!engine.is_game_active());
        assert!(MoveCountMatchesBoard::holds(engine.state()));
        assert!(MoveCountBounded::holds(engine.state()));
        assert!(WinningLineConsistent::holds(engine.state()));
    }

    #[test]
    fn test_seeded_state_satisfies_all() {
        let mut engine = GameEngine::builder().seed(3).build();
        engine.set_board_state([[X, O, E], [E, X, E], [O, E, E]], "X").unwrap();
        assert_eq!(engine.state().move_count(), &4);
        assert_eq!(EngineInvariants::check_all(engine.state()), Ok(()));
    }
}
