//! Command-line interface for the tic-tac-toe client.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tic-Tac-Toe - terminal client for an online game service
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play tic-tac-toe against an online game service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional; defaults apply when missing)
    #[arg(short, long, global = true, default_value = "tictactoe.toml")]
    pub config: PathBuf,

    /// Base URL of the game service, overrides the config file
    #[arg(long, global = true, env = "TICTACTOE_SERVER_URL")]
    pub server_url: Option<String>,

    /// File holding the signed-in user, overrides the config file
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Subcommand to run; defaults to `play`
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the interactive terminal UI
    Play,

    /// Print the stored user's match history
    History,

    /// Forget the stored session
    Logout,
}
