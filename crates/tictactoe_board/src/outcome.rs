//! Outcome derivation.
//!
//! The backend is authoritative for game results; this is the local
//! derivation used when a response omits the winning line.

use tracing::{instrument, trace};

use crate::error::BoardError;
use crate::lines::{WIN_LINES, WinLine};
use crate::types::{Board, Cell, Mark};

/// Concluded-or-not status of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Empty cells remain and nobody has three in a row.
    InProgress,
    /// `mark` holds all three cells of `line`.
    Win {
        /// The winning mark.
        mark: Mark,
        /// The completed line.
        line: WinLine,
    },
    /// Board is full and nobody won.
    Draw,
}

impl Outcome {
    /// True for `Win` and `Draw`.
    pub fn is_concluded(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// The winning mark, if any.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    /// The completed line, if any.
    pub fn line(&self) -> Option<WinLine> {
        match self {
            Outcome::Win { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Derives the outcome of a raw cell sequence.
///
/// The first line in [`WIN_LINES`] order whose three cells hold the same
/// mark wins. Fails with `InvalidBoardShape` unless there are exactly nine
/// cells.
#[instrument(skip(cells), fields(len = cells.len()))]
pub fn derive_outcome(cells: &[Cell]) -> Result<Outcome, BoardError> {
    let board = Board::from_cells(cells)?;
    Ok(scan(&board))
}

pub(crate) fn scan(board: &Board) -> Outcome {
    let cells = board.cells();
    for line in WIN_LINES {
        let [a, b, c] = line.indices();
        if let Cell::Occupied(mark) = cells[a]
            && cells[b] == cells[a]
            && cells[c] == cells[a]
        {
            trace!(%mark, %line, "win line found");
            return Outcome::Win { mark, line };
        }
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
