//! Screen implementations.

mod game;
mod history;
mod lobby;
mod login;

pub use game::GameScreen;
pub use history::HistoryScreen;
pub use lobby::LobbyScreen;
pub use login::LoginScreen;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::AppState;
use crate::theme::Palette;

/// Fills the screen with the theme's colours.
fn paint_background(frame: &mut Frame, palette: &Palette) {
    let block = Block::default().style(Style::default().fg(palette.text).bg(palette.background));
    frame.render_widget(block, frame.area());
}

fn render_title(frame: &mut Frame, area: Rect, title: &str, palette: &Palette) {
    let title = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

/// Transient message area; shows progress while a request is in flight.
fn render_message(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let text = match (state.message(), *state.fetching()) {
        (Some(message), _) => message.clone(),
        (None, true) => "Waiting for server…".to_string(),
        (None, false) => String::new(),
    };
    let message = Paragraph::new(text)
        .style(Style::default().fg(palette.message))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(message, area);
}

fn render_help(frame: &mut Frame, area: Rect, text: &str, palette: &Palette) {
    let help = Paragraph::new(text.to_string())
        .style(Style::default().fg(palette.muted))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}
