//! Terminal user interface.

mod app;
pub mod board;
pub mod input;
pub mod screen;
pub mod screens;

pub use app::{Flow, TuiApp};

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument};

use crate::{ClientConfig, GameBackend, HttpBackend, SessionController, SessionStore};

/// Runs the interactive client until the user quits.
///
/// Logging must already point at a file; anything written to stdout would
/// corrupt the screen.
#[instrument(skip_all, fields(server_url = %config.server_url()))]
pub async fn run(config: ClientConfig) -> Result<()> {
    info!("Starting tic-tac-toe client");

    let backend: Arc<dyn GameBackend> = Arc::new(HttpBackend::new(
        config.server_url(),
        config.request_timeout(),
    )?);

    let mut controller = SessionController::new(
        SessionStore::new(config.session_file().clone()),
        *config.theme(),
    );
    controller.restore();
    let mut app = TuiApp::new(controller);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend_term = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_term)?;

    let res = app.run(&mut terminal, backend).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Event loop error");
    }
    res
}
