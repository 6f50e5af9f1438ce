//! Tic-tac-toe engine.
//!
//! A single-board tic-tac-toe rules engine with a turn-taking state machine,
//! a computer opponent at three difficulties, and a bounded history of
//! finished matches persisted through an injected key-value store.
//!
//! # Architecture
//!
//! - **Types & rules**: [`Board`], [`Coord`], [`Mark`], win and draw detection
//! - **Settings**: [`OpponentMode`], [`FirstPlayer`], [`Difficulty`]
//! - **Engine**: [`GameEngine`] owns the match and drives computer turns
//! - **Strategy**: Easy (random), Medium (heuristic), Hard (minimax)
//! - **History**: [`HistoryLedger`] over a [`KeyValueStore`] and a [`Clock`]
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{GameEngine, MoveResult};
//!
//! let mut engine = GameEngine::builder().seed(7).build();
//! assert_eq!(engine.play_move(1, 1), MoveResult::Success);
//! assert_eq!(engine.status_text(), "Turn: O");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod engine;
mod error;
mod history;
mod invariants;
mod turn;
mod types;

pub mod rules;
pub mod strategy;

// Crate-level exports - Core types
pub use types::{Board, Cell, CellParseError, Coord, CoordError, Mark, Rows, SIZE};

// Crate-level exports - Settings
pub use config::{
    Difficulty, FirstPlayer, MarkAssignment, OpponentMode, Settings, difficulty_options,
    difficulty_summary, first_player_options, opponent_mode_options,
};

// Crate-level exports - Errors
pub use error::{ConfigurationError, StoreError};

// Crate-level exports - Engine
pub use engine::{
    CELL_OCCUPIED_TEXT, DEFAULT_DRAW_PATTERN, DRAW_TEXT, GAME_OVER_TEXT, GameEngine,
    GameEngineBuilder, GameState, InvalidMove, MessageKind, MoveResult, WAIT_FOR_COMPUTER_TEXT,
};
pub use turn::{Owner, TurnDescriptor};

// Crate-level exports - History
pub use history::{
    Clock, FileStore, FixedClock, HISTORY_KEY, HISTORY_LIMIT, HistoryEntry, HistoryLedger,
    KeyValueStore, MemoryStore, SystemClock,
};

// Crate-level exports - Invariants
pub use invariants::{
    EngineInvariants, Invariant, InvariantSet, InvariantViolation, MoveCountBounded,
    MoveCountMatchesBoard, WinningLineConsistent,
};

pub use strategy::Forecast;
