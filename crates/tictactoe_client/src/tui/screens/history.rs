//! Match history screen: the user's games, newest as the server lists them.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};
use tictactoe_board::Mark;
use tracing::{info, instrument};

use super::{paint_background, render_help, render_message, render_title};
use crate::api::{MatchStatus, Winner};
use crate::theme::Palette;
use crate::tui::screen::{Action, Screen};
use crate::{AppState, Intent};

fn status_color(status: MatchStatus, palette: &Palette) -> ratatui::style::Color {
    match status {
        MatchStatus::InProgress => palette.accent,
        MatchStatus::Finished(Winner::Mark(Mark::X)) => palette.mark_x,
        MatchStatus::Finished(Winner::Mark(Mark::O)) => palette.mark_o,
        MatchStatus::Finished(Winner::Draw) => palette.muted,
    }
}

/// State for the history screen.
#[derive(Debug, Default, Getters)]
pub struct HistoryScreen {
    table_state: TableState,
}

impl HistoryScreen {
    /// Creates the screen with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    fn step(&mut self, state: &AppState, forward: bool) {
        let count = state.history().len();
        if count == 0 {
            self.table_state.select(None);
            return;
        }
        let i = match (self.table_state.selected(), forward) {
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) if i > 0 => (i - 1).min(count - 1),
            (Some(_), false) => count - 1,
            (None, _) => 0,
        };
        self.table_state.select(Some(i));
    }
}

impl Screen for HistoryScreen {
    #[instrument(skip(self, frame, state))]
    fn render(&self, frame: &mut Frame, state: &AppState) {
        let palette = state.theme().palette();
        paint_background(frame, &palette);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = match state.user() {
            Some(user) => format!("Match History: {}", user.username()),
            None => "Match History".to_string(),
        };
        render_title(frame, chunks[0], &title, &palette);

        let header = Row::new(vec![
            Cell::from("Game").style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from("Result").style(Style::default().add_modifier(Modifier::BOLD)),
        ])
        .style(Style::default().fg(palette.accent));

        let rows: Vec<Row> = state
            .history()
            .iter()
            .map(|entry| {
                Row::new(vec![
                    Cell::from(entry.game_id().to_string()),
                    Cell::from(entry.status().to_string())
                        .style(Style::default().fg(status_color(*entry.status(), &palette))),
                ])
            })
            .collect();

        let block_title = if state.history().is_empty() && !*state.fetching() {
            "No games yet".to_string()
        } else {
            format!("Games ({})", state.history().len())
        };
        let table = Table::new(rows, [Constraint::Percentage(60), Constraint::Percentage(40)])
            .header(header)
            .style(Style::default().fg(palette.text))
            .block(Block::default().borders(Borders::ALL).title(block_title))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut table_state = self.table_state.clone();
        frame.render_stateful_widget(table, chunks[1], &mut table_state);

        render_message(frame, chunks[2], state, &palette);
        render_help(
            frame,
            chunks[3],
            "↑↓: Navigate | Enter: Open game | r: Reload | Esc / b: Back | q: Quit",
            &palette,
        );
    }

    #[instrument(skip(self, key, state))]
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Action {
        match key.code {
            KeyCode::Down => {
                self.step(state, true);
                Action::Stay
            }
            KeyCode::Up => {
                self.step(state, false);
                Action::Stay
            }
            KeyCode::Enter => match self
                .table_state
                .selected()
                .and_then(|i| state.history().get(i))
            {
                Some(entry) => {
                    info!(game_id = %entry.game_id(), "Opening game from history");
                    Action::Intent(Intent::JoinGame(entry.game_id().to_string()))
                }
                None => Action::Stay,
            },
            KeyCode::Char('r') => Action::Intent(Intent::LoadHistory),
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => Action::CloseHistory,
            KeyCode::Char('q') | KeyCode::Char('Q') => Action::Quit,
            _ => Action::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Theme;
    use crate::api::{GameId, MatchHistoryEntry, User};
    use crossterm::event::KeyModifiers;

    fn press(screen: &mut HistoryScreen, code: KeyCode, state: &AppState) -> Action {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE), state)
    }

    fn state_with_history() -> AppState {
        let mut state = AppState::new(Theme::Dark);
        state.sign_in(User::fallback("ada"));
        state.set_history(vec![
            MatchHistoryEntry::new(GameId::new("g1"), MatchStatus::InProgress),
            MatchHistoryEntry::new(GameId::new("g2"), MatchStatus::Finished(Winner::Draw)),
        ]);
        state
    }

    #[test]
    fn test_enter_without_selection_stays() {
        let state = state_with_history();
        let mut screen = HistoryScreen::new();
        assert_eq!(press(&mut screen, KeyCode::Enter, &state), Action::Stay);
    }

    #[test]
    fn test_select_and_open() {
        let state = state_with_history();
        let mut screen = HistoryScreen::new();
        press(&mut screen, KeyCode::Down, &state);
        press(&mut screen, KeyCode::Down, &state);
        assert_eq!(
            press(&mut screen, KeyCode::Enter, &state),
            Action::Intent(Intent::JoinGame("g2".to_string()))
        );
    }

    #[test]
    fn test_up_wraps_to_last() {
        let state = state_with_history();
        let mut screen = HistoryScreen::new();
        press(&mut screen, KeyCode::Down, &state);
        press(&mut screen, KeyCode::Up, &state);
        assert_eq!(screen.table_state().selected(), Some(1));
    }

    #[test]
    fn test_back_closes() {
        let state = state_with_history();
        let mut screen = HistoryScreen::new();
        assert_eq!(press(&mut screen, KeyCode::Esc, &state), Action::CloseHistory);
    }
}
