//! Lobby screen: hub after sign in.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{info, instrument};

use super::{paint_background, render_help, render_message, render_title};
use crate::tui::screen::{Action, Screen};
use crate::{AppState, Intent};

/// Menu options available in the lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LobbyOption {
    NewGame,
    JoinGame,
    History,
    ToggleTheme,
    LogOut,
    Quit,
}

impl LobbyOption {
    #[instrument]
    fn label(self) -> &'static str {
        match self {
            Self::NewGame => "New Game",
            Self::JoinGame => "Join Game",
            Self::History => "Match History",
            Self::ToggleTheme => "Toggle Theme",
            Self::LogOut => "Log Out",
            Self::Quit => "Quit",
        }
    }

    #[instrument]
    fn all() -> &'static [LobbyOption] {
        &[
            Self::NewGame,
            Self::JoinGame,
            Self::History,
            Self::ToggleTheme,
            Self::LogOut,
            Self::Quit,
        ]
    }
}

/// State for the lobby screen.
#[derive(Debug, Getters)]
pub struct LobbyScreen {
    list_state: ListState,
    /// Game id being typed; `Some` while the join prompt is open.
    join_input: Option<String>,
}

impl Default for LobbyScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LobbyScreen {
    /// Creates the lobby with the first option selected.
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            list_state,
            join_input: None,
        }
    }

    #[instrument(skip(self))]
    fn select_previous(&mut self) {
        let count = LobbyOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    #[instrument(skip(self))]
    fn select_next(&mut self) {
        let count = LobbyOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    #[instrument(skip(self))]
    fn selected_option(&self) -> LobbyOption {
        let options = LobbyOption::all();
        let idx = self.list_state.selected().unwrap_or(0);
        options[idx.min(options.len() - 1)]
    }

    #[instrument(skip(self, key))]
    fn handle_join_key(&mut self, key: KeyEvent) -> Action {
        let Some(input) = self.join_input.as_mut() else {
            return Action::Stay;
        };
        match key.code {
            KeyCode::Char(c) => {
                input.push(c);
                Action::Stay
            }
            KeyCode::Backspace => {
                input.pop();
                Action::Stay
            }
            KeyCode::Enter => {
                let id = input.clone();
                self.join_input = None;
                Action::Intent(Intent::JoinGame(id))
            }
            KeyCode::Esc => {
                self.join_input = None;
                Action::Stay
            }
            _ => Action::Stay,
        }
    }
}

impl Screen for LobbyScreen {
    #[instrument(skip(self, frame, state))]
    fn render(&self, frame: &mut Frame, state: &AppState) {
        let palette = state.theme().palette();
        paint_background(frame, &palette);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        render_title(frame, chunks[0], "Tic-Tac-Toe: Lobby", &palette);

        let player = state
            .user()
            .map(|user| format!("Player: {}   Theme: {}", user.username(), state.theme()))
            .unwrap_or_default();
        let profile_bar = Paragraph::new(player)
            .style(Style::default().fg(palette.text))
            .centered()
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(profile_bar, chunks[1]);

        match &self.join_input {
            Some(input) => {
                let prompt = Paragraph::new(format!("{}_", input))
                    .style(Style::default().fg(palette.text))
                    .block(Block::default().borders(Borders::ALL).title("Game id"));
                frame.render_widget(prompt, chunks[2]);
            }
            None => {
                let items: Vec<ListItem> = LobbyOption::all()
                    .iter()
                    .map(|opt| ListItem::new(opt.label()))
                    .collect();
                let menu = List::new(items)
                    .block(Block::default().borders(Borders::ALL).title("Menu"))
                    .highlight_style(
                        Style::default()
                            .fg(palette.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                    .highlight_symbol("> ");
                let mut list_state = self.list_state.clone();
                frame.render_stateful_widget(menu, chunks[2], &mut list_state);
            }
        }

        render_message(frame, chunks[3], state, &palette);
        let help = if self.join_input.is_some() {
            "Type a game id | Enter: Join | Esc: Cancel"
        } else {
            "↑↓: Navigate | Enter: Select | q: Quit"
        };
        render_help(frame, chunks[4], help, &palette);
    }

    #[instrument(skip(self, key, _state))]
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Action {
        if self.join_input.is_some() {
            return self.handle_join_key(key);
        }
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                Action::Stay
            }
            KeyCode::Down => {
                self.select_next();
                Action::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                info!(?option, "Lobby option selected");
                match option {
                    LobbyOption::NewGame => Action::Intent(Intent::NewGame),
                    LobbyOption::JoinGame => {
                        self.join_input = Some(String::new());
                        Action::Stay
                    }
                    LobbyOption::History => Action::ShowHistory,
                    LobbyOption::ToggleTheme => Action::Intent(Intent::ToggleTheme),
                    LobbyOption::LogOut => Action::Intent(Intent::Logout),
                    LobbyOption::Quit => Action::Quit,
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
            _ => Action::Stay,
        }
    }
}
