//! tictactoe - play tic-tac-toe in the terminal.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use tictactoe_console::{Cli, Command, ConsoleConfig, print_history, run};
use tictactoe_engine::{FileStore, GameEngine};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ConsoleConfig::from_file(&cli.config)?.with_overrides(&cli);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => play(&config),
        Command::History => history(&config),
        Command::ClearHistory => clear_history(&config),
    }
}

fn build_engine(config: &ConsoleConfig) -> GameEngine {
    let builder = GameEngine::builder()
        .settings(*config.settings())
        .store(FileStore::new(config.history_dir()));
    match config.seed() {
        Some(seed) => builder.seed(*seed).build(),
        None => builder.build(),
    }
}

/// Run the interactive game on stdin/stdout
#[instrument(skip(config))]
fn play(config: &ConsoleConfig) -> Result<()> {
    info!(settings = ?config.settings(), "Starting console session");
    let mut engine = build_engine(config);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    run(&mut engine, stdin.lock(), &mut stdout)
}

/// Print the stored history
#[instrument(skip(config))]
fn history(config: &ConsoleConfig) -> Result<()> {
    let engine = build_engine(config);
    print_history(&engine.history(), &mut std::io::stdout())
}

/// Delete the stored history
#[instrument(skip(config))]
fn clear_history(config: &ConsoleConfig) -> Result<()> {
    let mut engine = build_engine(config);
    engine.clear_history();
    println!("History cleared.");
    Ok(())
}
