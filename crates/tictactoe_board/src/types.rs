//! Core board types: marks, cells and the 9-cell board.

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use tracing::instrument;

use crate::error::{BoardError, BoardErrorKind};
use crate::outcome::{Outcome, scan};

/// Number of cells on a board.
pub const CELL_COUNT: usize = 9;

/// A player symbol.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, EnumIter,
)]
pub enum Mark {
    /// Player X.
    X,
    /// Player O.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Parses a mark leniently (surrounding whitespace, either case).
    #[instrument]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "X" | "x" => Some(Mark::X),
            "O" | "o" => Some(Mark::O),
            _ => None,
        }
    }
}

/// A single cell of the board.
///
/// On the wire an empty cell is `null`; `""` and `" "` are also accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "Option<String>")]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    #[display(" ")]
    Empty,
    /// Occupied by a mark.
    #[display("{_0}")]
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }

    /// True when nobody has played here.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        Cell::Occupied(mark)
    }
}

impl TryFrom<Option<String>> for Cell {
    type Error = BoardError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        match value.as_deref().map(str::trim) {
            None | Some("") => Ok(Cell::Empty),
            Some(raw) => Mark::parse(raw).map(Cell::Occupied).ok_or_else(|| {
                BoardError::new(BoardErrorKind::InvalidMark {
                    value: raw.to_string(),
                })
            }),
        }
    }
}

impl From<Cell> for Option<String> {
    fn from(cell: Cell) -> Self {
        cell.mark().map(|mark| mark.to_string())
    }
}

/// 3x3 board in row-major order (indices 0-8).
///
/// Always holds exactly nine cells; any other length is rejected on
/// construction with [`BoardErrorKind::InvalidBoardShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from exactly nine cells.
    #[instrument(skip(cells), fields(len = cells.len()))]
    pub fn from_cells(cells: &[Cell]) -> Result<Self, BoardError> {
        let cells: [Cell; CELL_COUNT] = cells.try_into().map_err(|_| {
            BoardError::new(BoardErrorKind::InvalidBoardShape { len: cells.len() })
        })?;
        Ok(Self { cells })
    }

    /// Gets the cell at the given index, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// True when the index is on the board and empty.
    pub fn is_vacant(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Indices of empty cells in ascending order.
    pub fn vacant_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.mark() == Some(mark))
            .count()
    }

    /// Derives the outcome of this board.
    pub fn outcome(&self) -> Outcome {
        scan(self)
    }

    /// Formats the board as a human-readable grid, numbering empty cells 1-9.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => result.push_str(&(index + 1).to_string()),
                    Cell::Occupied(mark) => result.push_str(&mark.to_string()),
                }
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl From<[Cell; CELL_COUNT]> for Board {
    fn from(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }
}

impl TryFrom<Vec<Cell>> for Board {
    type Error = BoardError;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        Self::from_cells(&cells)
    }
}

impl From<Board> for Vec<Cell> {
    fn from(board: Board) -> Self {
        board.cells.to_vec()
    }
}

/// Parses a compact board such as `"XO. .X..O"`.
///
/// `X`/`O` (either case) are marks; `.`, `-`, `_` and space are empty.
/// Line breaks and `|` separators are ignored.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !matches!(c, '\n' | '\r' | '|'))
            .map(|c| match c {
                '.' | '-' | '_' | ' ' => Ok(Cell::Empty),
                other => Mark::parse(&other.to_string())
                    .map(Cell::Occupied)
                    .ok_or_else(|| {
                        BoardError::new(BoardErrorKind::InvalidMark {
                            value: other.to_string(),
                        })
                    }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(&cells)
    }
}
