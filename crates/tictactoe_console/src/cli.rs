//! Command-line interface for the tictactoe console.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use tictactoe_engine::{Difficulty, FirstPlayer, OpponentMode};

/// Tic-tac-toe in the terminal, against a friend or the computer.
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a TOML config file
    #[arg(long, global = true, default_value = "tictactoe.toml")]
    pub config: PathBuf,

    /// Opponent: "human" or "computer" (labels such as "Versus computer" also work)
    #[arg(long, global = true, value_parser = OpponentMode::from_str)]
    pub mode: Option<OpponentMode>,

    /// Who moves first against the computer: "player" or "computer"
    #[arg(long, global = true, value_parser = FirstPlayer::from_str)]
    pub first: Option<FirstPlayer>,

    /// Computer strength: "easy", "medium" or "hard"
    #[arg(long, global = true, value_parser = Difficulty::from_str)]
    pub difficulty: Option<Difficulty>,

    /// Seed for the computer's random choices
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Directory holding the match history
    #[arg(long, global = true)]
    pub history_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play interactively: enter `row col`, `reset` or `quit`
    Play,

    /// Print the five most recent finished matches
    History,

    /// Delete the match history
    ClearHistory,
}
