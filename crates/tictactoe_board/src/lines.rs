//! The eight winning lines.

use derive_more::Display;
use tracing::instrument;

use crate::error::{BoardError, BoardErrorKind};
use crate::types::CELL_COUNT;

/// An index triple whose cells win when they share a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{:?}", _0)]
pub struct WinLine([usize; 3]);

/// All win lines in scan order: rows, then columns, then diagonals.
pub const WIN_LINES: [WinLine; 8] = [
    // Rows
    WinLine([0, 1, 2]),
    WinLine([3, 4, 5]),
    WinLine([6, 7, 8]),
    // Columns
    WinLine([0, 3, 6]),
    WinLine([1, 4, 7]),
    WinLine([2, 5, 8]),
    // Diagonals
    WinLine([0, 4, 8]),
    WinLine([2, 4, 6]),
];

impl WinLine {
    /// The three board indices of this line, ascending.
    pub const fn indices(&self) -> [usize; 3] {
        self.0
    }

    /// True when `index` lies on this line.
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    /// Looks up the win line made of these indices, in any order.
    #[instrument]
    pub fn from_indices(indices: &[usize]) -> Result<Self, BoardError> {
        let unknown = || {
            BoardError::new(BoardErrorKind::UnknownWinLine {
                indices: indices.to_vec(),
            })
        };
        let mut sorted: [usize; 3] = indices.try_into().map_err(|_| unknown())?;
        if sorted.iter().any(|&i| i >= CELL_COUNT) {
            return Err(unknown());
        }
        sorted.sort_unstable();
        WIN_LINES
            .iter()
            .copied()
            .find(|line| line.0 == sorted)
            .ok_or_else(unknown)
    }

    /// Short description for status text.
    pub fn label(&self) -> &'static str {
        match self.0 {
            [0, 1, 2] => "top row",
            [3, 4, 5] => "middle row",
            [6, 7, 8] => "bottom row",
            [0, 3, 6] => "left column",
            [1, 4, 7] => "center column",
            [2, 5, 8] => "right column",
            [0, 4, 8] => "main diagonal",
            _ => "anti-diagonal",
        }
    }
}
