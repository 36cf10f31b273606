//! Tic-tac-toe board model.
//!
//! A flat 9-cell board, the eight fixed win lines, and the pure outcome
//! derivation used by the client when the backend does not report a
//! winning line.
//!
//! ```
//! use tictactoe_board::{Board, Mark, Outcome, WIN_LINES};
//!
//! let board: Board = "XXX......".parse().unwrap();
//! assert_eq!(
//!     board.outcome(),
//!     Outcome::Win { mark: Mark::X, line: WIN_LINES[0] }
//! );
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod lines;
mod outcome;
mod types;

pub use error::{BoardError, BoardErrorKind};
pub use lines::{WIN_LINES, WinLine};
pub use outcome::{Outcome, derive_outcome};
pub use types::{Board, CELL_COUNT, Cell, Mark};
