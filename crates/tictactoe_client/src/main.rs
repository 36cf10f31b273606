//! Tic-Tac-Toe - terminal client
//!
//! Runs the interactive UI by default; `history` and `logout` work on the
//! stored session without opening the UI.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use tictactoe_client::{
    ClientConfig, GameBackend, HttpBackend, SessionStore, init_file_logging, init_stderr_logging,
    tui,
};
use tracing::{info, instrument};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_play(config).await,
        Command::History => run_history(config).await,
        Command::Logout => run_logout(config),
    }
}

/// Reads the config file and applies command-line overrides.
fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load_or_default(&cli.config)?;
    if let Some(url) = &cli.server_url {
        config = config.with_server_url(url.clone());
    }
    if let Some(path) = &cli.session_file {
        config = config.with_session_file(path.clone());
    }
    Ok(config)
}

/// Run the terminal UI
async fn run_play(config: ClientConfig) -> Result<()> {
    // Log to a file so output never corrupts the UI
    init_file_logging(config.log_file())
        .with_context(|| format!("Failed to open log file {}", config.log_file().display()))?;
    tui::run(config).await
}

/// Print match history for the stored user
#[instrument(skip_all, fields(server_url = %config.server_url()))]
async fn run_history(config: ClientConfig) -> Result<()> {
    init_stderr_logging();

    let store = SessionStore::new(config.session_file().clone());
    let Some(user) = store.load()? else {
        bail!("Not signed in; run `tictactoe play` to log in first");
    };

    let backend = HttpBackend::new(config.server_url(), config.request_timeout())?;
    let games = backend.list_games(user.id()).await?;
    info!(
        count = games.len(),
        server = backend.base_url(),
        "Fetched match history"
    );

    if games.is_empty() {
        println!("No games yet for {}", user.username());
        return Ok(());
    }
    println!("Games for {}:", user.username());
    for entry in &games {
        println!("  {:<24} {}", entry.game_id().to_string(), entry.status());
    }
    Ok(())
}

/// Forget the stored session
fn run_logout(config: ClientConfig) -> Result<()> {
    init_stderr_logging();

    let store = SessionStore::new(config.session_file().clone());
    store.clear()?;
    println!("Signed out");
    Ok(())
}
