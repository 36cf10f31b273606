//! Backend access.
//!
//! [`GameBackend`] is the seam between the session controller and the
//! remote service; [`HttpBackend`] is the production implementation.

mod error;
mod http;
mod wire;

use async_trait::async_trait;

pub use error::ApiError;
pub use http::HttpBackend;
pub use wire::{
    CredentialsBody, GameId, GameSnapshot, GameStateBody, HistoryBody, HistoryItemBody,
    MatchHistoryEntry, MatchStatus, MoveBody, NewGameBody, User, UserId, Winner,
};

use crate::ClientError;

/// Operations the remote game service offers.
#[async_trait]
pub trait GameBackend: Send + Sync {
    /// Creates an account.
    async fn signup(&self, username: &str) -> Result<User, ClientError>;

    /// Signs in to an existing account.
    async fn login(&self, username: &str) -> Result<User, ClientError>;

    /// Starts a new game for `player`.
    async fn create_game(&self, player: &UserId) -> Result<GameSnapshot, ClientError>;

    /// Fetches the current state of a game.
    async fn fetch_game(&self, game: &GameId) -> Result<GameSnapshot, ClientError>;

    /// Submits a move and returns the resulting state.
    async fn submit_move(
        &self,
        game: &GameId,
        player: &UserId,
        index: usize,
    ) -> Result<GameSnapshot, ClientError>;

    /// Lists the games `user` has played.
    async fn list_games(&self, user: &UserId) -> Result<Vec<MatchHistoryEntry>, ClientError>;
}
