//! Presentation model of the board.
//!
//! [`GameView`] decides which cells accept a click and which are
//! highlighted. It never changes the board; a click only produces a
//! [`MoveIntent`] for the controller.

use derive_getters::Getters;
use tictactoe_board::{Board, CELL_COUNT, Cell, WinLine};
use tracing::{debug, instrument};

use crate::AppState;

/// Request to play at a board index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    /// Board index 0-8.
    pub index: usize,
}

/// Render data for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    /// Board index 0-8.
    pub index: usize,
    /// Contents.
    pub cell: Cell,
    /// Whether a click here would emit a move intent.
    pub clickable: bool,
    /// Part of the winning line.
    pub highlighted: bool,
}

/// Interactive view of one board.
#[derive(Debug, Clone, Getters)]
pub struct GameView {
    board: Board,
    playing: bool,
    disabled: bool,
    highlight: Option<WinLine>,
}

impl GameView {
    /// Creates a view.
    ///
    /// `playing` is false once the game has a result; `disabled` is true
    /// while a request is in flight.
    pub fn new(board: Board, playing: bool, disabled: bool, highlight: Option<WinLine>) -> Self {
        Self {
            board,
            playing,
            disabled,
            highlight,
        }
    }

    /// View of the open game in `state`, if there is one.
    pub fn from_state(state: &AppState) -> Option<Self> {
        state.game().as_ref().map(|game| {
            Self::new(
                *game.snapshot().board(),
                !game.is_concluded(),
                *state.fetching(),
                game.highlight(),
            )
        })
    }

    /// Whether a click on `index` would emit a move intent.
    pub fn is_clickable(&self, index: usize) -> bool {
        self.playing && !self.disabled && self.board.is_vacant(index)
    }

    /// Handles a click on `index`.
    #[instrument(skip(self), fields(playing = self.playing, disabled = self.disabled))]
    pub fn click(&self, index: usize) -> Option<MoveIntent> {
        if self.is_clickable(index) {
            debug!("Emitting move intent");
            Some(MoveIntent { index })
        } else {
            debug!("Ignoring click");
            None
        }
    }

    /// Render data for all nine cells.
    pub fn cells(&self) -> [CellView; CELL_COUNT] {
        std::array::from_fn(|index| CellView {
            index,
            cell: self.board.cells()[index],
            clickable: self.is_clickable(index),
            highlighted: self.highlight.is_some_and(|line| line.contains(index)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(board: &str, playing: bool, disabled: bool) -> GameView {
        GameView::new(board.parse().unwrap(), playing, disabled, None)
    }

    #[test]
    fn test_click_on_empty_cell_emits_intent() {
        let view = view("X...O....", true, false);
        assert_eq!(view.click(1), Some(MoveIntent { index: 1 }));
    }

    #[test]
    fn test_click_on_occupied_cell_is_ignored() {
        let view = view("X...O....", true, false);
        assert_eq!(view.click(0), None);
        assert_eq!(view.click(4), None);
    }

    #[test]
    fn test_disabled_view_emits_nothing() {
        let view = view("X...O....", true, true);
        for index in 0..CELL_COUNT {
            assert_eq!(view.click(index), None);
        }
    }

    #[test]
    fn test_finished_game_emits_nothing() {
        let view = view("XXXOO....", false, false);
        assert_eq!(view.click(8), None);
    }

    #[test]
    fn test_out_of_range_click_is_ignored() {
        let view = view(".........", true, false);
        assert_eq!(view.click(9), None);
    }

    #[test]
    fn test_highlight_marks_line_cells() {
        let line = WinLine::from_indices(&[0, 4, 8]).unwrap();
        let view = GameView::new("X.O.XO..X".parse().unwrap(), false, false, Some(line));
        let highlighted: Vec<usize> = view
            .cells()
            .iter()
            .filter(|c| c.highlighted)
            .map(|c| c.index)
            .collect();
        assert_eq!(highlighted, vec![0, 4, 8]);
        assert!(view.cells().iter().all(|c| !c.clickable));
    }
}
