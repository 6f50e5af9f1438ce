//! Match settings: opponent mode, who moves first, and computer difficulty.

use crate::error::ConfigurationError;
use crate::types::Mark;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::instrument;

/// Whether the second party is a human or the computer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::AsRefStr,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OpponentMode {
    /// Two humans share the board.
    #[default]
    Human,
    /// The human plays against a computer strategy.
    Computer,
}

impl OpponentMode {
    /// Returns the display label for this option.
    pub fn label(self) -> &'static str {
        match self {
            Self::Human => "Two players",
            Self::Computer => "Versus computer",
        }
    }
}

/// Which party takes the first move (X) in Computer mode.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::AsRefStr,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FirstPlayer {
    /// The human plays X.
    #[default]
    Player,
    /// The computer plays X.
    Computer,
}

impl FirstPlayer {
    /// Returns the display label for this option.
    pub fn label(self) -> &'static str {
        match self {
            Self::Player => "Player first",
            Self::Computer => "Computer first",
        }
    }
}

/// Which move selector the computer uses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::AsRefStr,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random moves.
    #[default]
    Easy,
    /// Win if possible, otherwise block, otherwise prefer center and corners.
    Medium,
    /// Full minimax search; never loses.
    Hard,
}

impl Difficulty {
    /// Returns the display label for this option.
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Returns a short description of how this difficulty plays.
    pub fn description(self) -> &'static str {
        match self {
            Self::Easy => "random moves",
            Self::Medium => "defends first",
            Self::Hard => "optimal play",
        }
    }
}

/// Parses an option by its value or its label, ignoring case.
#[track_caller]
fn parse_option<T>(
    setting: &'static str,
    input: &str,
    label: fn(T) -> &'static str,
) -> Result<T, ConfigurationError>
where
    T: IntoEnumIterator + AsRef<str> + Copy,
{
    let wanted = input.trim();
    let found = T::iter().find(|option| {
        option.as_ref().eq_ignore_ascii_case(wanted) || label(*option).eq_ignore_ascii_case(wanted)
    });
    match found {
        Some(option) => Ok(option),
        None => Err(ConfigurationError::new(setting, input)),
    }
}

impl FromStr for OpponentMode {
    type Err = ConfigurationError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("opponent mode", s, Self::label)
    }
}

impl FromStr for FirstPlayer {
    type Err = ConfigurationError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("first player", s, Self::label)
    }
}

impl FromStr for Difficulty {
    type Err = ConfigurationError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("difficulty", s, Self::label)
    }
}

/// Labels of every opponent mode, in menu order.
pub fn opponent_mode_options() -> Vec<&'static str> {
    OpponentMode::iter().map(OpponentMode::label).collect()
}

/// Labels of every first-player option, in menu order.
pub fn first_player_options() -> Vec<&'static str> {
    FirstPlayer::iter().map(FirstPlayer::label).collect()
}

/// Labels of every difficulty, in menu order.
pub fn difficulty_options() -> Vec<&'static str> {
    Difficulty::iter().map(Difficulty::label).collect()
}

/// One-line summary of all difficulties, e.g. `"Easy: random moves, ..."`.
pub fn difficulty_summary() -> String {
    Difficulty::iter()
        .map(|d| format!("{}: {}", d.label(), d.description()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Which mark each party holds for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters, new)]
pub struct MarkAssignment {
    /// Mark played by the human at the keyboard.
    player: Mark,
    /// Mark played by the computer (or by the second human).
    computer: Mark,
}

impl MarkAssignment {
    /// Derives the assignment: the computer holds X only when it moves first
    /// in Computer mode.
    #[instrument]
    pub fn derive(mode: OpponentMode, first: FirstPlayer) -> Self {
        match (mode, first) {
            (OpponentMode::Computer, FirstPlayer::Computer) => Self::new(Mark::O, Mark::X),
            _ => Self::new(Mark::X, Mark::O),
        }
    }
}

/// Settings for a match.
///
/// In Human mode the first player is always [`FirstPlayer::Player`] and the
/// difficulty is retained but inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct Settings {
    /// Human or computer opponent.
    opponent_mode: OpponentMode,
    /// Who moves first.
    first_player: FirstPlayer,
    /// Computer strategy.
    difficulty: Difficulty,
}

impl Settings {
    /// Creates settings, forcing the first player to the human in Human mode.
    #[instrument]
    pub fn new(opponent_mode: OpponentMode, first_player: FirstPlayer, difficulty: Difficulty) -> Self {
        let mut settings = Self {
            opponent_mode,
            first_player,
            difficulty,
        };
        settings.normalize();
        settings
    }

    /// Restores the Human-mode invariant after deserialization or mutation.
    pub(crate) fn normalize(&mut self) {
        if self.opponent_mode == OpponentMode::Human {
            self.first_player = FirstPlayer::Player;
        }
    }

    pub(crate) fn set_opponent_mode(&mut self, mode: OpponentMode) {
        self.opponent_mode = mode;
        self.normalize();
    }

    pub(crate) fn set_first_player(&mut self, first: FirstPlayer) {
        self.first_player = first;
        self.normalize();
    }

    pub(crate) fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Returns the mark assignment implied by these settings.
    pub fn marks(&self) -> MarkAssignment {
        MarkAssignment::derive(self.opponent_mode, self.first_player)
    }

    /// Checks if the computer is a party to the match.
    pub fn against_computer(&self) -> bool {
        self.opponent_mode == OpponentMode::Computer
    }
}
