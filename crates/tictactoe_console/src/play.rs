//! Interactive play loop and history printing.

use anyhow::Result;
use std::io::{BufRead, Write};
use tictactoe_engine::{Board, GameEngine, HistoryEntry, MessageKind, difficulty_summary};
use tracing::{debug, info, instrument};

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Place a mark at (row, col).
    Move(u8, u8),
    /// Start a new match.
    Reset,
    /// Change the opponent mode.
    Mode(String),
    /// Change who moves first.
    First(String),
    /// Change the computer's difficulty.
    Difficulty(String),
    /// Print the match history.
    History,
    /// Show the commands.
    Help,
    /// Leave the loop.
    Quit,
    /// Anything else.
    Unknown(String),
}

impl Input {
    /// Parses a line typed at the prompt.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        match command.to_ascii_lowercase().as_str() {
            "reset" | "new" => Self::Reset,
            "quit" | "exit" | "q" => Self::Quit,
            "help" | "?" => Self::Help,
            "history" => Self::History,
            "mode" => Self::Mode(rest.to_string()),
            "first" => Self::First(rest.to_string()),
            "difficulty" => Self::Difficulty(rest.to_string()),
            _ => Self::parse_move(line).unwrap_or_else(|| Self::Unknown(line.to_string())),
        }
    }

    /// Accepts `"2 3"`, `"2,3"` or the cell key form `"2-3"`.
    fn parse_move(line: &str) -> Option<Self> {
        let mut parts = line
            .split(|c: char| c.is_whitespace() || c == ',' || c == '-')
            .filter(|p| !p.is_empty());
        let row = parts.next()?.parse().ok()?;
        let col = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::Move(row, col))
    }
}

const HELP: &str = "Commands:
  <row> <col>        place your mark (rows and columns are 1-3)
  reset              start a new match
  mode <value>       human | computer
  first <value>      player | computer
  difficulty <value> easy | medium | hard
  history            show recent results
  quit               leave";

/// Writes the board, status line and any message.
pub fn render(engine: &GameEngine, out: &mut impl Write) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", Board::from_rows(engine.board_snapshot()).display())?;
    writeln!(out)?;
    writeln!(out, "{}", engine.status_text())?;
    if !engine.message().is_empty() {
        let prefix = match engine.message_kind() {
            MessageKind::Error => "! ",
            MessageKind::Success => "* ",
            MessageKind::Info => "",
        };
        writeln!(out, "{}{}", prefix, engine.message())?;
    }
    Ok(())
}

/// Writes the history, most recent first.
pub fn print_history(entries: &[HistoryEntry], out: &mut impl Write) -> Result<()> {
    if entries.is_empty() {
        writeln!(out, "No finished matches yet.")?;
        return Ok(());
    }
    for entry in entries {
        writeln!(
            out,
            "{}  {:<7} {} moves",
            entry.finished_at().format("%Y-%m-%d %H:%M"),
            entry.outcome(),
            entry.moves()
        )?;
    }
    Ok(())
}

/// Runs the interactive loop until `quit` or end of input.
#[instrument(skip_all)]
pub fn run(engine: &mut GameEngine, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Difficulties: {}", difficulty_summary())?;
    writeln!(out, "Type `help` for commands.")?;
    render(engine, out)?;

    for line in input.lines() {
        let line = line?;
        let command = Input::parse(&line);
        debug!(?command, "Input");

        match command {
            Input::Move(row, col) => {
                let result = engine.play_move(row, col);
                if let tictactoe_engine::MoveResult::Invalid(reason) = result {
                    writeln!(out, "! {}", reason)?;
                }
            }
            Input::Reset => engine.reset_game(),
            Input::Mode(value) => {
                if let Err(e) = engine.set_opponent_mode(&value) {
                    writeln!(out, "! {}", e)?;
                }
            }
            Input::First(value) => {
                if let Err(e) = engine.set_first_player(&value) {
                    writeln!(out, "! {}", e)?;
                }
            }
            Input::Difficulty(value) => {
                if !engine.is_difficulty_selection_enabled() {
                    writeln!(out, "Difficulty only applies against the computer.")?;
                }
                if let Err(e) = engine.set_difficulty(&value) {
                    writeln!(out, "! {}", e)?;
                }
            }
            Input::History => {
                print_history(&engine.history(), out)?;
                continue;
            }
            Input::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Input::Quit => break,
            Input::Unknown(text) => {
                writeln!(out, "Unrecognized input '{}'. Type `help` for commands.", text)?;
                continue;
            }
        }
        render(engine, out)?;
    }

    info!("Session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves() {
        assert_eq!(Input::parse("1 3"), Input::Move(1, 3));
        assert_eq!(Input::parse(" 2,2 "), Input::Move(2, 2));
        assert_eq!(Input::parse("3-1"), Input::Move(3, 1));
        assert_eq!(Input::parse("1 2 3"), Input::Unknown("1 2 3".to_string()));
        assert_eq!(Input::parse("x y"), Input::Unknown("x y".to_string()));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Input::parse("RESET"), Input::Reset);
        assert_eq!(Input::parse("quit"), Input::Quit);
        assert_eq!(Input::parse("difficulty Hard"), Input::Difficulty("Hard".to_string()));
        assert_eq!(Input::parse("mode Versus computer"), Input::Mode("Versus computer".to_string()));
    }
}
