//! REST implementation of [`GameBackend`].

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::wire::{
    CredentialsBody, GameId, GameSnapshot, GameStateBody, HistoryBody, MatchHistoryEntry,
    MoveBody, NewGameBody, User, UserId,
};
use super::{ApiError, GameBackend};
use crate::ClientError;

/// HTTP client for the game service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Creates a client for `base_url`. `timeout` bounds each request.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        info!(base_url = %base_url, ?timeout, "HTTP backend ready");
        Ok(Self { base_url, client })
    }

    /// Base URL without a trailing slash.
    #[instrument(skip(self))]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self))]
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and decodes a JSON success body.
    #[instrument(skip_all)]
    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, body = %body, "Got response");

        if !status.is_success() {
            warn!(status = %status, "Request rejected by server");
            return Err(ApiError::status(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    #[instrument(skip_all)]
    async fn send_game(&self, request: reqwest::RequestBuilder) -> Result<GameSnapshot, ClientError> {
        let body: GameStateBody = self.send(request).await?;
        Ok(GameSnapshot::try_from(body)?)
    }
}

#[async_trait]
impl GameBackend for HttpBackend {
    #[instrument(skip(self))]
    async fn signup(&self, username: &str) -> Result<User, ClientError> {
        info!("Signing up");
        let request = self
            .client
            .post(self.url("/users/signup"))
            .json(&CredentialsBody { username });
        Ok(self.send(request).await?)
    }

    #[instrument(skip(self))]
    async fn login(&self, username: &str) -> Result<User, ClientError> {
        info!("Logging in");
        let request = self
            .client
            .post(self.url("/users/login"))
            .json(&CredentialsBody { username });
        Ok(self.send(request).await?)
    }

    #[instrument(skip(self), fields(player = %player))]
    async fn create_game(&self, player: &UserId) -> Result<GameSnapshot, ClientError> {
        info!("Creating game");
        let request = self
            .client
            .post(self.url("/games"))
            .json(&NewGameBody { player });
        self.send_game(request).await
    }

    #[instrument(skip(self), fields(game = %game))]
    async fn fetch_game(&self, game: &GameId) -> Result<GameSnapshot, ClientError> {
        debug!("Fetching game");
        let request = self.client.get(self.url(&format!("/games/{}", game)));
        self.send_game(request).await
    }

    #[instrument(skip(self), fields(game = %game, player = %player))]
    async fn submit_move(
        &self,
        game: &GameId,
        player: &UserId,
        index: usize,
    ) -> Result<GameSnapshot, ClientError> {
        info!(index, "Submitting move");
        let request = self
            .client
            .post(self.url(&format!("/games/{}/move", game)))
            .json(&MoveBody {
                player,
                move_index: index,
            });
        self.send_game(request).await
    }

    #[instrument(skip(self), fields(user = %user))]
    async fn list_games(&self, user: &UserId) -> Result<Vec<MatchHistoryEntry>, ClientError> {
        debug!("Listing games");
        let request = self.client.get(self.url(&format!("/users/{}/games", user)));
        let body: HistoryBody = self.send(request).await?;
        let entries = body
            .into_items()
            .into_iter()
            .map(MatchHistoryEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = entries.len(), "Listed games");
        Ok(entries)
    }
}
