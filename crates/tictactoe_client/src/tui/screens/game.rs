//! Game screen: the board plus status, driven by keyboard or mouse.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, instrument};

use super::{paint_background, render_help, render_message, render_title};
use crate::api::Winner;
use crate::tui::board::{BOARD_HEIGHT, hit_test, render_board};
use crate::tui::input::{digit_index, move_cursor};
use crate::tui::screen::{Action, Screen};
use crate::view::GameView;
use crate::{AppState, Intent};

const HELP: &str =
    "1-9/arrows/click: Move | r: Refresh | n: New | h: History | t: Theme | x: Log out | q: Quit";

/// Screen regions, shared by rendering and click handling.
struct GameLayout {
    title: Rect,
    info: Rect,
    board: Rect,
    status: Rect,
    message: Rect,
    help: Rect,
}

fn layout(area: Rect) -> GameLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(BOARD_HEIGHT),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);
    GameLayout {
        title: chunks[0],
        info: chunks[1],
        board: chunks[2],
        status: chunks[3],
        message: chunks[4],
        help: chunks[5],
    }
}

/// Status line for the open game.
pub fn status_text(state: &AppState) -> String {
    let Some(game) = state.game() else {
        return "No game open".to_string();
    };
    match game.result() {
        Some(result) => match (*result.winner(), *result.line()) {
            (Winner::Draw, _) => "Draw".to_string(),
            (Winner::Mark(mark), Some(line)) => format!("{} wins ({})!", mark, line.label()),
            (Winner::Mark(mark), None) => format!("{} wins!", mark),
        },
        None if *state.fetching() => format!("Next: {}   (waiting…)", game.snapshot().next()),
        None => format!("Next: {}", game.snapshot().next()),
    }
}

/// State for the game screen.
#[derive(Debug, Getters)]
pub struct GameScreen {
    cursor: usize,
}

impl Default for GameScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl GameScreen {
    /// Creates the screen with the cursor on the centre cell.
    pub fn new() -> Self {
        Self { cursor: 4 }
    }

    fn play(&self, index: usize, state: &AppState) -> Action {
        match GameView::from_state(state).and_then(|view| view.click(index)) {
            Some(intent) => Action::Intent(Intent::Move(intent.index)),
            None => {
                debug!(index, "Cell not playable");
                Action::Stay
            }
        }
    }
}

impl Screen for GameScreen {
    #[instrument(skip(self, frame, state))]
    fn render(&self, frame: &mut Frame, state: &AppState) {
        let palette = state.theme().palette();
        paint_background(frame, &palette);
        let regions = layout(frame.area());

        render_title(frame, regions.title, "Tic-Tac-Toe", &palette);

        let info = match (state.user(), state.game()) {
            (Some(user), Some(game)) => {
                format!("Player: {}   Game: {}", user.username(), game.snapshot().id())
            }
            (Some(user), None) => format!("Player: {}", user.username()),
            _ => String::new(),
        };
        let info = Paragraph::new(info)
            .style(Style::default().fg(palette.text))
            .centered()
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(info, regions.info);

        if let Some(view) = GameView::from_state(state) {
            let cursor = (*view.playing()).then_some(self.cursor);
            render_board(frame, regions.board, &view, cursor, &palette);
        }

        let status = Paragraph::new(status_text(state))
            .style(
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .centered()
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, regions.status);

        render_message(frame, regions.message, state, &palette);
        render_help(frame, regions.help, HELP, &palette);
    }

    #[instrument(skip(self, key, state))]
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Action {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => match digit_index(c) {
                Some(index) => {
                    self.cursor = index;
                    self.play(index, state)
                }
                None => Action::Stay,
            },
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key.code);
                Action::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.play(self.cursor, state),
            KeyCode::Char('r') => Action::Intent(Intent::Refresh),
            KeyCode::Char('n') => Action::Intent(Intent::NewGame),
            KeyCode::Char('h') => Action::ShowHistory,
            KeyCode::Char('t') => Action::Intent(Intent::ToggleTheme),
            KeyCode::Char('x') => Action::Intent(Intent::Logout),
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::Stay,
        }
    }

    #[instrument(skip(self, state))]
    fn handle_click(&mut self, area: Rect, column: u16, row: u16, state: &AppState) -> Action {
        match hit_test(layout(area).board, column, row) {
            Some(index) => {
                self.cursor = index;
                self.play(index, state)
            }
            None => Action::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{GameId, GameSnapshot, User};
    use crate::session::ActiveGame;
    use crate::Theme;
    use crossterm::event::KeyModifiers;
    use tictactoe_board::{Board, Mark};

    fn state_with(board: &str, winner: Option<Winner>) -> AppState {
        let mut state = AppState::new(Theme::Dark);
        state.sign_in(User::fallback("ada"));
        let snapshot = GameSnapshot::new(
            GameId::new("g1"),
            board.parse::<Board>().unwrap(),
            Mark::O,
            winner,
            None,
        );
        state.show_game(ActiveGame::reconcile(snapshot));
        state
    }

    fn press(screen: &mut GameScreen, code: KeyCode, state: &AppState) -> Action {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE), state)
    }

    #[test]
    fn test_digit_plays_vacant_cell() {
        let state = state_with("X........", None);
        let mut screen = GameScreen::new();
        assert_eq!(
            press(&mut screen, KeyCode::Char('5'), &state),
            Action::Intent(Intent::Move(4))
        );
        assert_eq!(press(&mut screen, KeyCode::Char('1'), &state), Action::Stay);
    }

    #[test]
    fn test_cursor_then_enter() {
        let state = state_with("X........", None);
        let mut screen = GameScreen::new();
        press(&mut screen, KeyCode::Up, &state);
        press(&mut screen, KeyCode::Right, &state);
        assert_eq!(*screen.cursor(), 2);
        assert_eq!(
            press(&mut screen, KeyCode::Enter, &state),
            Action::Intent(Intent::Move(2))
        );
    }

    #[test]
    fn test_moves_ignored_while_fetching() {
        let mut state = state_with("X........", None);
        state.set_fetching(true);
        let mut screen = GameScreen::new();
        assert_eq!(press(&mut screen, KeyCode::Char('5'), &state), Action::Stay);
    }

    #[test]
    fn test_click_maps_to_cell() {
        let state = state_with(".........", None);
        let mut screen = GameScreen::new();
        let area = Rect::new(0, 0, 80, 40);
        let board = crate::tui::board::board_rect(layout(area).board);
        assert_eq!(
            screen.handle_click(area, board.x, board.y, &state),
            Action::Intent(Intent::Move(0))
        );
        assert_eq!(screen.handle_click(area, 0, 0, &state), Action::Stay);
    }

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(&state_with("X........", None)), "Next: O");
        assert_eq!(
            status_text(&state_with("XXXOO....", Some(Winner::Mark(Mark::X)))),
            "X wins (top row)!"
        );
        assert_eq!(
            status_text(&state_with("XOXXOOOXX", Some(Winner::Draw))),
            "Draw"
        );
    }
}
