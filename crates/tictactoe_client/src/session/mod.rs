//! Session orchestration: application state, intents and backend requests.

mod controller;
mod request;
mod state;

pub use controller::{Intent, SessionController};
pub use request::{Completion, Reply, Request, Ticket, execute};
pub use state::{ActiveGame, AppState, GameResult, Phase, Session};
