//! Board widget: drawing and mouse hit-testing share one geometry.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tictactoe_board::{CELL_COUNT, Cell, Mark};

use crate::theme::Palette;
use crate::view::{CellView, GameView};

/// Width of one cell in columns.
pub const CELL_WIDTH: u16 = 7;
/// Height of one cell in rows.
pub const CELL_HEIGHT: u16 = 3;
/// Full board width including separators.
pub const BOARD_WIDTH: u16 = CELL_WIDTH * 3 + 2;
/// Full board height including separators.
pub const BOARD_HEIGHT: u16 = CELL_HEIGHT * 3 + 2;

/// The board's rectangle, centered in `area`.
pub fn board_rect(area: Rect) -> Rect {
    let width = BOARD_WIDTH.min(area.width);
    let height = BOARD_HEIGHT.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Rectangles of the nine cells, in board index order.
pub fn cell_rects(board: Rect) -> [Rect; CELL_COUNT] {
    std::array::from_fn(|index| {
        let (row, col) = (index as u16 / 3, index as u16 % 3);
        Rect::new(
            board.x + col * (CELL_WIDTH + 1),
            board.y + row * (CELL_HEIGHT + 1),
            CELL_WIDTH,
            CELL_HEIGHT,
        )
    })
}

/// Board index under a terminal position, if any.
pub fn hit_test(area: Rect, column: u16, row: u16) -> Option<usize> {
    let board = board_rect(area);
    cell_rects(board).iter().position(|cell| {
        column >= cell.x
            && column < cell.x + cell.width
            && row >= cell.y
            && row < cell.y + cell.height
            && column < board.x + board.width
            && row < board.y + board.height
    })
}

/// Draws the 3x3 grid centered in `area`.
pub fn render_board(
    frame: &mut Frame,
    area: Rect,
    view: &GameView,
    cursor: Option<usize>,
    palette: &Palette,
) {
    let cells = view.cells();
    let separator = Style::default().fg(palette.muted);
    let mut lines = Vec::with_capacity(BOARD_HEIGHT as usize);

    for row in 0..3 {
        if row > 0 {
            lines.push(Line::from(Span::styled(
                "───────┼───────┼───────",
                separator,
            )));
        }
        for sub_row in 0..CELL_HEIGHT {
            let mut spans = Vec::with_capacity(5);
            for col in 0..3 {
                if col > 0 {
                    spans.push(Span::styled("│", separator));
                }
                let cell = &cells[row * 3 + col];
                let text = if sub_row == CELL_HEIGHT / 2 {
                    cell_label(cell)
                } else {
                    " ".repeat(CELL_WIDTH as usize)
                };
                spans.push(Span::styled(text, cell_style(cell, cursor, palette)));
            }
            lines.push(Line::from(spans));
        }
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Left);
    frame.render_widget(paragraph, board_rect(area));
}

fn cell_label(cell: &CellView) -> String {
    let symbol = match cell.cell {
        Cell::Occupied(mark) => mark.to_string(),
        Cell::Empty => (cell.index + 1).to_string(),
    };
    format!("{:^width$}", symbol, width = CELL_WIDTH as usize)
}

fn cell_style(cell: &CellView, cursor: Option<usize>, palette: &Palette) -> Style {
    let base = match cell.cell {
        Cell::Occupied(Mark::X) => Style::default()
            .fg(palette.mark_x)
            .add_modifier(Modifier::BOLD),
        Cell::Occupied(Mark::O) => Style::default()
            .fg(palette.mark_o)
            .add_modifier(Modifier::BOLD),
        Cell::Empty if cell.clickable => Style::default().fg(palette.text),
        Cell::Empty => Style::default().fg(palette.muted),
    };

    if cell.highlighted {
        base.bg(palette.highlight)
    } else if cursor == Some(cell.index) {
        base.bg(palette.cursor)
    } else {
        base
    }
}
