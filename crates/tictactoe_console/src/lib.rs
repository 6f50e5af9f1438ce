//! Terminal front end for the tic-tac-toe engine.
//!
//! Parses command-line flags, loads a TOML config and drives a
//! [`GameEngine`](tictactoe_engine::GameEngine) from stdin.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod play;

pub use cli::{Cli, Command};
pub use config::{ConsoleConfig, ConsoleConfigError};
pub use play::{Input, print_history, render, run};
