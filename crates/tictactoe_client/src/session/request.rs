//! Backend requests issued by the controller and their completions.

use tracing::{debug, instrument};

use crate::ClientError;
use crate::api::{GameBackend, GameId, GameSnapshot, MatchHistoryEntry, User, UserId};

/// A backend call the controller wants made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `POST /users/login`
    Login {
        /// Username typed by the user.
        username: String,
    },
    /// `POST /users/signup`
    Signup {
        /// Username typed by the user.
        username: String,
    },
    /// `POST /games`
    CreateGame {
        /// Creating player.
        player: UserId,
    },
    /// `GET /games/{id}`
    FetchGame {
        /// Game to fetch.
        game: GameId,
    },
    /// `POST /games/{id}/move`
    Move {
        /// Game to play in.
        game: GameId,
        /// Moving player.
        player: UserId,
        /// Board index 0-8.
        index: usize,
    },
    /// `GET /users/{id}/games`
    History {
        /// Whose games.
        user: UserId,
    },
}

/// Successful response payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Login or signup succeeded.
    User(User),
    /// A game snapshot.
    Game(GameSnapshot),
    /// Match history rows.
    History(Vec<MatchHistoryEntry>),
}

/// A request stamped with the epoch it was issued in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Logout epoch at issue time.
    pub epoch: u64,
    /// The call to make.
    pub request: Request,
}

/// Result of executing a [`Ticket`].
#[derive(Debug, Clone)]
pub struct Completion {
    /// Logout epoch the request was issued in.
    pub epoch: u64,
    /// The call that was made.
    pub request: Request,
    /// What the backend answered.
    pub result: Result<Reply, ClientError>,
}

/// Performs the ticket's request against `backend`.
#[instrument(skip(backend), fields(epoch = ticket.epoch))]
pub async fn execute<B: GameBackend + ?Sized>(backend: &B, ticket: Ticket) -> Completion {
    let result = match &ticket.request {
        Request::Login { username } => backend.login(username).await.map(Reply::User),
        Request::Signup { username } => backend.signup(username).await.map(Reply::User),
        Request::CreateGame { player } => backend.create_game(player).await.map(Reply::Game),
        Request::FetchGame { game } => backend.fetch_game(game).await.map(Reply::Game),
        Request::Move {
            game,
            player,
            index,
        } => backend
            .submit_move(game, player, *index)
            .await
            .map(Reply::Game),
        Request::History { user } => backend.list_games(user).await.map(Reply::History),
    };
    debug!(ok = result.is_ok(), "Request finished");
    Completion {
        epoch: ticket.epoch,
        request: ticket.request,
        result,
    }
}
