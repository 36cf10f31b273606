//! Screen trait and the actions screens return.

use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::{AppState, Intent};

/// The result of handling an input event on a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do.
    Stay,
    /// Forward an intent to the session controller.
    Intent(Intent),
    /// Open the match history.
    ShowHistory,
    /// Leave the match history.
    CloseHistory,
    /// Exit the application.
    Quit,
}

/// Implemented by each screen.
///
/// Screens keep only local UI state (cursor, text input); everything else
/// is read from [`AppState`].
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, state: &AppState);

    /// Handles a key press.
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Action;

    /// Handles a left click at a terminal position. `area` is the whole
    /// terminal.
    fn handle_click(&mut self, _area: Rect, _column: u16, _row: u16, _state: &AppState) -> Action {
        Action::Stay
    }
}
