//! Terminal client for an online tic-tac-toe service.
//!
//! The client signs a user in, creates or joins games, submits moves and
//! renders the board the server returns. The server owns every rule; the
//! client only keeps presentation state and never changes a board itself.
//!
//! # Architecture
//!
//! - **api**: [`GameBackend`] seam and its REST implementation [`HttpBackend`]
//! - **session**: [`SessionController`] turns [`Intent`]s into requests and
//!   folds responses into [`AppState`]
//! - **view**: [`GameView`] decides which cells accept a click
//! - **tui**: ratatui screens and the event loop
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_client::{Intent, SessionController, SessionStore, Theme};
//!
//! let mut controller = SessionController::new(SessionStore::new("session.json"), Theme::Dark);
//! let ticket = controller.dispatch(Intent::Login("ada".to_string()));
//! assert!(ticket.is_some());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod config;
mod error;
mod logging;
mod session;
mod store;
mod theme;
mod view;

pub mod tui;

// Crate-level exports - Backend
pub use api::{
    ApiError, CredentialsBody, GameBackend, GameId, GameSnapshot, GameStateBody, HistoryBody,
    HistoryItemBody, HttpBackend, MatchHistoryEntry, MatchStatus, MoveBody, NewGameBody, User,
    UserId, Winner,
};

// Crate-level exports - Configuration and logging
pub use config::{ClientConfig, ConfigError};
pub use logging::{init_file_logging, init_stderr_logging};

// Crate-level exports - Errors
pub use error::ClientError;

// Crate-level exports - Session
pub use session::{
    ActiveGame, AppState, Completion, GameResult, Intent, Phase, Reply, Request, Session,
    SessionController, Ticket, execute,
};
pub use store::{SessionStore, StoreError};

// Crate-level exports - Presentation
pub use theme::{Palette, Theme};
pub use view::{CellView, GameView, MoveIntent};
