//! The game state machine.
//!
//! [`GameEngine`] owns the board, the turn, the match lifecycle and the
//! history ledger. All mutation goes through its operations. When the
//! computer is on move after a transition, the engine plays its ply before
//! returning, guarded by a single in-progress flag.

use crate::config::{Difficulty, FirstPlayer, MarkAssignment, OpponentMode, Settings};
use crate::error::ConfigurationError;
use crate::history::{Clock, HistoryEntry, HistoryLedger, KeyValueStore, MemoryStore, SystemClock};
use crate::invariants::{EngineInvariants, InvariantSet};
use crate::rules::{find_winner, is_full};
use crate::strategy::{self, Forecast};
use crate::turn::{Owner, TurnDescriptor};
use crate::types::{Board, Cell, Coord, CoordError, Mark, Rows};
use derive_getters::Getters;
use derive_more::Display;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

/// Status text shown once a match has finished.
pub const GAME_OVER_TEXT: &str = "Game over";
/// Outcome text for a drawn match.
pub const DRAW_TEXT: &str = "Draw";
/// Message shown when a move targets an occupied cell.
pub const CELL_OCCUPIED_TEXT: &str = "Cell is already occupied";
/// Message shown when the human tries to move for the computer.
pub const WAIT_FOR_COMPUTER_TEXT: &str = "Please wait for the computer to move";

const X: Cell = Cell::Occupied(Mark::X);
const O: Cell = Cell::Occupied(Mark::O);

/// Board used by [`GameEngine::set_draw_state`] when no pattern is given.
pub const DEFAULT_DRAW_PATTERN: Rows = [[X, O, X], [X, O, O], [O, X, X]];

/// How a message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum MessageKind {
    /// Neutral information, including a draw.
    #[default]
    Info,
    /// A win.
    Success,
    /// A rejected move.
    Error,
}

/// Why a move was rejected as invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InvalidMove {
    /// The target cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Coord),
    /// The coordinate is off the board.
    #[display("{}", _0)]
    OutOfBounds(CoordError),
}

/// Outcome of a move request.
///
/// Describes the caller's own ply. A computer reply that follows is visible
/// through the engine's accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// The mark was placed and play continues.
    Success,
    /// The mark was placed and completed a line.
    Win {
        /// The winning mark.
        mark: Mark,
        /// The completed line.
        line: [Coord; 3],
    },
    /// The mark was placed and filled the board.
    Draw,
    /// The move was rejected; the board is unchanged.
    Invalid(InvalidMove),
    /// The match is over; the board is unchanged.
    Inactive,
    /// It is the computer's turn; the board is unchanged.
    Blocked,
}

impl MoveResult {
    /// Checks if a mark was placed.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success | Self::Win { .. } | Self::Draw)
    }
}

/// Everything observable about the current match.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Mark on move.
    current: Mark,
    /// False once the match is won or drawn.
    active: bool,
    /// Number of marks on the board.
    move_count: u32,
    /// Last user-facing message; empty when there is nothing to say.
    message: String,
    /// How to present `message`.
    message_kind: MessageKind,
    /// Cells of the completed line, empty unless the match was won.
    winning_line: Vec<Coord>,
    /// The computer's most recent ply in this match.
    last_computer_move: Option<Coord>,
    /// The computer's opening ply in this match, if it moved first.
    opening_move: Option<Coord>,
}

impl GameState {
    fn new() -> Self {
        Self {
            board: Board::new(),
            current: Mark::X,
            active: true,
            move_count: 0,
            message: String::new(),
            message_kind: MessageKind::Info,
            winning_line: Vec::new(),
            last_computer_move: None,
            opening_move: None,
        }
    }

    fn seeded(board: Board, current: Mark) -> Self {
        let move_count = board.occupied() as u32;
        Self {
            board,
            current,
            move_count,
            ..Self::new()
        }
    }

    fn finish_won(&mut self, mark: Mark, line: [Coord; 3]) {
        self.active = false;
        self.winning_line = line.to_vec();
        self.message = format!("{} wins", mark);
        self.message_kind = MessageKind::Success;
    }

    fn finish_drawn(&mut self) {
        self.active = false;
        self.winning_line.clear();
        self.message = DRAW_TEXT.to_string();
        self.message_kind = MessageKind::Info;
    }

    fn reject(&mut self, message: &str) {
        self.message = message.to_string();
        self.message_kind = MessageKind::Error;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Actor {
    Human,
    Computer,
}

/// Builder for [`GameEngine`].
#[derive(Default)]
pub struct GameEngineBuilder {
    store: Option<Box<dyn KeyValueStore>>,
    clock: Option<Box<dyn Clock>>,
    seed: Option<u64>,
    settings: Settings,
}

impl GameEngineBuilder {
    /// Persists history through `store` (default: a fresh [`MemoryStore`]).
    pub fn store(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Stamps history entries with `clock` (default: [`SystemClock`]).
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Seeds the random source used by the Easy and Medium strategies.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Starts with `settings` (default: two players, X first, Easy).
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Builds the engine and starts the first match.
    #[instrument(skip(self), fields(settings = ?self.settings, seed = ?self.seed))]
    pub fn build(self) -> GameEngine {
        let store = self.store.unwrap_or_else(|| Box::new(MemoryStore::new()));
        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock));
        let seed = self.seed.unwrap_or_else(rand::random);
        let mut settings = self.settings;
        settings.normalize();

        let mut engine = GameEngine {
            settings,
            marks: settings.marks(),
            state: GameState::new(),
            ledger: HistoryLedger::from_boxed(store, clock),
            rng: ChaCha8Rng::seed_from_u64(seed),
            previous_opening: None,
            computing: false,
        };
        engine.reset_game();
        engine
    }
}

/// Tic-tac-toe engine.
#[derive(Debug)]
pub struct GameEngine {
    settings: Settings,
    marks: MarkAssignment,
    state: GameState,
    ledger: HistoryLedger,
    rng: ChaCha8Rng,
    previous_opening: Option<Coord>,
    computing: bool,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Creates an engine with default collaborators and settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder for injecting a store, clock, seed or settings.
    pub fn builder() -> GameEngineBuilder {
        GameEngineBuilder::default()
    }

    // ─────────────────────────────────────────────────────────────
    //  Lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Starts a fresh match.
    ///
    /// If the computer moves first, its opening ply is played before this
    /// returns.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        self.marks = self.settings.marks();
        self.state = GameState::new();
        info!(
            mode = %self.settings.opponent_mode(),
            first = %self.settings.first_player(),
            difficulty = %self.settings.difficulty(),
            "New match"
        );
        self.check_invariants();
        self.run_computer_turns();
    }

    /// Places the current mark at (`row`, `col`) for the human party.
    ///
    /// When the move succeeds and the computer is next, the computer's reply
    /// is played before this returns.
    #[instrument(skip(self), fields(current = %self.state.current))]
    pub fn play_move(&mut self, row: u8, col: u8) -> MoveResult {
        let result = match Coord::new(row, col) {
            Ok(coord) => self.perform_move(coord, Actor::Human),
            Err(e) => {
                warn!(error = %e, "Move off the board");
                MoveResult::Invalid(InvalidMove::OutOfBounds(e))
            }
        };
        if result.is_success() {
            self.run_computer_turns();
        }
        result
    }

    /// Plays one computer ply if the computer is on move.
    ///
    /// Returns `None` if it is not the computer's turn, no move is
    /// available, or a computer move is already being made.
    #[instrument(skip(self))]
    pub fn request_computer_move(&mut self) -> Option<MoveResult> {
        if self.computing || !self.is_computer_turn() {
            return None;
        }
        self.computing = true;
        let result = self.computer_ply();
        self.computing = false;
        result
    }

    fn perform_move(&mut self, coord: Coord, actor: Actor) -> MoveResult {
        if !self.state.active {
            debug!(%coord, "Move after game over ignored");
            return MoveResult::Inactive;
        }

        if actor == Actor::Human && self.is_computer_turn() {
            warn!(%coord, "Human tried to move on the computer's turn");
            self.state.reject(WAIT_FOR_COMPUTER_TEXT);
            return MoveResult::Blocked;
        }

        if !self.state.board.is_empty(coord) {
            warn!(%coord, "Cell already occupied");
            self.state.reject(CELL_OCCUPIED_TEXT);
            return MoveResult::Invalid(InvalidMove::CellOccupied(coord));
        }

        let mark = self.state.current;
        self.state.board.set(coord, Cell::Occupied(mark));
        self.state.move_count += 1;
        self.state.message.clear();
        self.state.message_kind = MessageKind::Info;
        debug!(%coord, %mark, ?actor, move_count = self.state.move_count, "Mark placed");

        if actor == Actor::Computer {
            self.state.last_computer_move = Some(coord);
            if self.state.move_count == 1 {
                self.state.opening_move = Some(coord);
                self.previous_opening = Some(coord);
            }
        }

        let result = if let Some(line) = find_winner(&self.state.board) {
            self.state.finish_won(line.mark, line.cells);
            self.record_outcome(Some(line.mark));
            MoveResult::Win {
                mark: line.mark,
                line: line.cells,
            }
        } else if is_full(&self.state.board) {
            self.state.finish_drawn();
            self.record_outcome(None);
            MoveResult::Draw
        } else {
            self.state.current = mark.opponent();
            MoveResult::Success
        };

        self.check_invariants();
        result
    }

    /// Plays computer plies while the computer is on move.
    ///
    /// Iterative rather than recursive; the in-progress flag makes nested
    /// calls no-ops.
    fn run_computer_turns(&mut self) {
        if self.computing {
            debug!("Computer move already in progress");
            return;
        }
        self.computing = true;
        while self.is_computer_turn() {
            match self.computer_ply() {
                Some(result) if result.is_success() => {}
                other => {
                    warn!(?other, "Computer could not move");
                    break;
                }
            }
        }
        self.computing = false;
    }

    fn computer_ply(&mut self) -> Option<MoveResult> {
        let mark = *self.marks.computer();
        let coord = strategy::select_move(
            *self.settings.difficulty(),
            &self.state.board,
            mark,
            self.previous_opening,
            &mut self.rng,
        )?;
        info!(%coord, %mark, difficulty = %self.settings.difficulty(), "Computer move");
        Some(self.perform_move(coord, Actor::Computer))
    }

    fn record_outcome(&mut self, winner: Option<Mark>) {
        info!(outcome = %self.state.message, moves = self.state.move_count, "Match finished");
        self.ledger.record(&self.state.message, winner, self.state.move_count);
    }

    fn check_invariants(&self) {
        if let Err(violations) = EngineInvariants::check_all(&self.state) {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Engine invariant violated");
            if cfg!(debug_assertions) {
                panic!("Engine invariant violated: {}", descriptions);
            }
        }
    }

    fn is_computer_turn(&self) -> bool {
        self.settings.against_computer() && self.state.active && self.state.current == *self.marks.computer()
    }

    // ─────────────────────────────────────────────────────────────
    //  Configuration
    // ─────────────────────────────────────────────────────────────

    /// Switches between two players and playing the computer.
    ///
    /// A change restarts the match. Switching to two players also makes the
    /// human move first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `mode` is not a known value or label.
    #[track_caller]
    #[instrument(skip(self, mode), fields(mode = mode.as_ref()))]
    pub fn set_opponent_mode(&mut self, mode: impl AsRef<str>) -> Result<(), ConfigurationError> {
        let mode = OpponentMode::from_str(mode.as_ref())?;
        if *self.settings.opponent_mode() != mode {
            info!(%mode, "Opponent mode changed");
            self.settings.set_opponent_mode(mode);
            self.reset_game();
        }
        Ok(())
    }

    /// Chooses who moves first. A change restarts the match.
    ///
    /// Ignored in two-player mode, where the human always moves first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `first` is not a known value or label.
    #[track_caller]
    #[instrument(skip(self, first), fields(first = first.as_ref()))]
    pub fn set_first_player(&mut self, first: impl AsRef<str>) -> Result<(), ConfigurationError> {
        let first = FirstPlayer::from_str(first.as_ref())?;
        let before = *self.settings.first_player();
        self.settings.set_first_player(first);
        if *self.settings.first_player() != before {
            info!(%first, "First player changed");
            self.reset_game();
        }
        Ok(())
    }

    /// Chooses the computer strategy.
    ///
    /// Does not restart the match. If the computer is on move and has not
    /// yet played, it moves immediately with the new strategy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `difficulty` is not a known value or label.
    #[track_caller]
    #[instrument(skip(self, difficulty), fields(difficulty = difficulty.as_ref()))]
    pub fn set_difficulty(&mut self, difficulty: impl AsRef<str>) -> Result<(), ConfigurationError> {
        let difficulty = Difficulty::from_str(difficulty.as_ref())?;
        if *self.settings.difficulty() != difficulty {
            info!(%difficulty, "Difficulty changed");
            self.settings.set_difficulty(difficulty);
        }
        self.run_computer_turns();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Test seams
    // ─────────────────────────────────────────────────────────────

    /// Seeds an arbitrary position with `turn` on move.
    ///
    /// `turn` is `"X"`, `"O"`, or a mark with its owner such as
    /// `"O (Computer)"`. In Computer mode an owner re-derives which mark the
    /// computer holds. The move count is re-derived from the board; a
    /// position that is already won or full is left finished. No history is
    /// recorded and the computer does not move.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `turn` cannot be parsed; the state
    /// is left untouched.
    #[track_caller]
    #[instrument(skip(self, rows))]
    pub fn set_board_state(&mut self, rows: Rows, turn: &str) -> Result<(), ConfigurationError> {
        let turn = TurnDescriptor::from_str(turn)?;

        if self.settings.against_computer()
            && let Some(owner) = turn.owner
        {
            let computer = match owner {
                Owner::Computer => turn.mark,
                Owner::Player => turn.mark.opponent(),
            };
            let first = if computer == Mark::X {
                FirstPlayer::Computer
            } else {
                FirstPlayer::Player
            };
            self.settings.set_first_player(first);
            self.marks = self.settings.marks();
        }

        self.state = GameState::seeded(Board::from_rows(rows), turn.mark);
        if let Some(line) = find_winner(&self.state.board) {
            self.state.finish_won(line.mark, line.cells);
        } else if is_full(&self.state.board) {
            self.state.finish_drawn();
        }
        info!(%turn, move_count = self.state.move_count, active = self.state.active, "Board state seeded");
        self.check_invariants();
        Ok(())
    }

    /// Seeds a finished draw and records it in the history.
    ///
    /// Uses [`DEFAULT_DRAW_PATTERN`] when `pattern` is `None`.
    #[instrument(skip(self, pattern))]
    pub fn set_draw_state(&mut self, pattern: Option<Rows>) {
        let rows = pattern.unwrap_or(DEFAULT_DRAW_PATTERN);
        self.state = GameState::seeded(Board::from_rows(rows), Mark::X);
        self.state.finish_drawn();
        self.record_outcome(None);
        self.check_invariants();
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Returns the full match state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the cell at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside 1..=3; that is a caller bug,
    /// not a gameplay condition.
    pub fn cell(&self, row: u8, col: u8) -> Cell {
        match Coord::new(row, col) {
            Ok(coord) => self.state.board.get(coord),
            Err(e) => panic!("{}", e),
        }
    }

    /// Returns a copy of the board as rows.
    pub fn board_snapshot(&self) -> Rows {
        self.state.board.rows()
    }

    /// Status line: whose turn it is, or that the game is over.
    pub fn status_text(&self) -> String {
        if !self.state.active {
            return GAME_OVER_TEXT.to_string();
        }
        if !self.settings.against_computer() {
            return format!("Turn: {}", self.state.current);
        }
        let owner = if self.state.current == *self.marks.computer() {
            Owner::Computer
        } else {
            Owner::Player
        };
        format!("Turn: {} ({})", self.state.current, owner)
    }

    /// Last user-facing message.
    pub fn message(&self) -> &str {
        &self.state.message
    }

    /// How to present [`message`](Self::message).
    pub fn message_kind(&self) -> MessageKind {
        self.state.message_kind
    }

    /// Cells of the winning line; empty unless the match was won.
    pub fn winning_cells(&self) -> Vec<Coord> {
        self.state.winning_line.clone()
    }

    /// Checks if moves are still accepted.
    pub fn is_game_active(&self) -> bool {
        self.state.active
    }

    /// Current opponent mode.
    pub fn opponent_mode(&self) -> OpponentMode {
        *self.settings.opponent_mode()
    }

    /// Current first-player setting.
    pub fn first_player(&self) -> FirstPlayer {
        *self.settings.first_player()
    }

    /// Current difficulty.
    pub fn difficulty(&self) -> Difficulty {
        *self.settings.difficulty()
    }

    /// Difficulty only matters against the computer.
    pub fn is_difficulty_selection_enabled(&self) -> bool {
        self.settings.against_computer()
    }

    /// Mark held by the human at the keyboard.
    pub fn human_mark(&self) -> Mark {
        *self.marks.player()
    }

    /// Mark held by the computer.
    pub fn computer_mark(&self) -> Mark {
        *self.marks.computer()
    }

    /// The computer's most recent ply in this match.
    pub fn last_computer_move(&self) -> Option<Coord> {
        self.state.last_computer_move
    }

    /// The computer's opening ply in this match, if it moved first.
    pub fn last_opening_move(&self) -> Option<Coord> {
        self.state.opening_move
    }

    /// Outcome of perfect play from here, for the computer.
    ///
    /// [`Forecast::Unknown`] in two-player mode.
    #[instrument(skip(self))]
    pub fn optimal_outcome_for_computer(&self) -> Forecast {
        if !self.settings.against_computer() {
            return Forecast::Unknown;
        }
        strategy::forecast(&self.state.board, self.state.current, *self.marks.computer())
    }

    /// Finished matches, most recent first (at most five).
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.ledger.list()
    }

    /// Removes all finished matches from the history.
    pub fn clear_history(&mut self) {
        self.ledger.clear();
    }
}
