//! Login screen: username entry for sign in or sign up.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, instrument};

use super::{paint_background, render_help, render_message, render_title};
use crate::tui::screen::{Action, Screen};
use crate::{AppState, Intent};

/// Whether Enter signs in or creates an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    /// Existing account.
    #[default]
    Login,
    /// New account.
    Signup,
}

impl LoginMode {
    fn toggle(self) -> Self {
        match self {
            Self::Login => Self::Signup,
            Self::Signup => Self::Login,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Login => "Log in",
            Self::Signup => "Sign up",
        }
    }
}

/// State for the login screen.
#[derive(Debug, Default, Getters)]
pub struct LoginScreen {
    username: String,
    mode: LoginMode,
}

impl LoginScreen {
    /// Creates an empty login form.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Screen for LoginScreen {
    #[instrument(skip(self, frame, state))]
    fn render(&self, frame: &mut Frame, state: &AppState) {
        let palette = state.theme().palette();
        paint_background(frame, &palette);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        render_title(frame, chunks[0], "Tic-Tac-Toe", &palette);

        let tabs = Line::from(
            [LoginMode::Login, LoginMode::Signup]
                .into_iter()
                .flat_map(|mode| {
                    let style = if mode == self.mode {
                        Style::default()
                            .fg(palette.accent)
                            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                    } else {
                        Style::default().fg(palette.muted)
                    };
                    [Span::styled(mode.label(), style), Span::raw("   ")]
                })
                .collect::<Vec<_>>(),
        )
        .centered();
        frame.render_widget(Paragraph::new(tabs), chunks[1]);

        let input = Paragraph::new(format!("{}_", self.username))
            .style(Style::default().fg(palette.text))
            .block(Block::default().borders(Borders::ALL).title("Username"));
        frame.render_widget(input, chunks[2]);

        render_message(frame, chunks[4], state, &palette);
        render_help(
            frame,
            chunks[5],
            "Type a username | Tab: Log in / Sign up | Enter: Submit | Esc: Quit",
            &palette,
        );
    }

    #[instrument(skip(self, key, _state))]
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Action {
        match key.code {
            KeyCode::Char(c) => {
                self.username.push(c);
                Action::Stay
            }
            KeyCode::Backspace => {
                self.username.pop();
                Action::Stay
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.mode = self.mode.toggle();
                debug!(mode = ?self.mode, "Login mode changed");
                Action::Stay
            }
            KeyCode::Enter => {
                let name = self.username.clone();
                Action::Intent(match self.mode {
                    LoginMode::Login => Intent::Login(name),
                    LoginMode::Signup => Intent::Signup(name),
                })
            }
            KeyCode::Esc => Action::Quit,
            _ => Action::Stay,
        }
    }
}
