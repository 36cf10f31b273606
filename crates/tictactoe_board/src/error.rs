//! Board error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while building or reading a board.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardErrorKind {
    /// The cell sequence did not have exactly nine entries.
    #[display("board must have exactly 9 cells, got {len}")]
    InvalidBoardShape {
        /// Number of cells actually supplied.
        len: usize,
    },
    /// A cell or winner value was not a recognized mark.
    #[display("unrecognized mark {value:?}")]
    InvalidMark {
        /// The offending value.
        value: String,
    },
    /// An index triple is not one of the eight win lines.
    #[display("{indices:?} is not a win line")]
    UnknownWinLine {
        /// The offending indices.
        indices: Vec<usize>,
    },
}

/// Board error with location tracking.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Board error: {} at {}:{}", kind, file, line)]
pub struct BoardError {
    /// What went wrong.
    pub kind: BoardErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardError {
    /// Creates a new board error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: BoardErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &BoardErrorKind {
        &self.kind
    }

    /// True when the error is an [`BoardErrorKind::InvalidBoardShape`].
    pub fn is_invalid_shape(&self) -> bool {
        matches!(self.kind, BoardErrorKind::InvalidBoardShape { .. })
    }
}

impl From<BoardErrorKind> for BoardError {
    #[track_caller]
    fn from(kind: BoardErrorKind) -> Self {
        Self::new(kind)
    }
}
