//! Session controller flows against an in-memory backend.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tempfile::TempDir;
use tictactoe_board::{Board, Cell, Mark, Outcome};
use tictactoe_client::{
    ApiError, ClientError, GameBackend, GameId, GameSnapshot, Intent, MatchHistoryEntry,
    MatchStatus, Phase, SessionController, SessionStore, Theme, User, UserId, Winner, execute,
};

/// Referee that applies moves and reports results the way the real service does.
#[derive(Default)]
struct FakeBackend {
    games: Mutex<HashMap<String, Board>>,
    next_id: AtomicUsize,
    login_down: bool,
}

impl FakeBackend {
    fn login_down() -> Self {
        Self {
            login_down: true,
            ..Self::default()
        }
    }

    fn snapshot(id: &str, board: Board) -> GameSnapshot {
        let next = if board.count(Mark::X) == board.count(Mark::O) {
            Mark::X
        } else {
            Mark::O
        };
        let (winner, line) = match board.outcome() {
            Outcome::InProgress => (None, None),
            Outcome::Win { mark, line } => (Some(Winner::Mark(mark)), Some(line)),
            Outcome::Draw => (Some(Winner::Draw), None),
        };
        GameSnapshot::new(GameId::new(id), board, next, winner, line)
    }

    /// Plays the next mark at `index` as the other player would, bypassing the client.
    fn opponent_moves(&self, id: &str, index: usize) {
        let mut games = self.games.lock().unwrap();
        let board = games.get_mut(id).expect("game exists");
        let mark = *Self::snapshot(id, *board).next();
        let mut cells = *board.cells();
        cells[index] = Cell::Occupied(mark);
        *board = Board::from(cells);
    }

    fn user(&self, username: &str) -> Result<User, ClientError> {
        if self.login_down {
            return Err(ApiError::new("Could not reach the game server").into());
        }
        Ok(User::new(
            UserId::new(format!("u-{}", username)),
            username.to_string(),
        ))
    }
}

#[async_trait]
impl GameBackend for FakeBackend {
    async fn signup(&self, username: &str) -> Result<User, ClientError> {
        self.user(username)
    }

    async fn login(&self, username: &str) -> Result<User, ClientError> {
        self.user(username)
    }

    async fn create_game(&self, _player: &UserId) -> Result<GameSnapshot, ClientError> {
        let id = format!("g{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.games
            .lock()
            .unwrap()
            .insert(id.clone(), Board::new());
        Ok(Self::snapshot(&id, Board::new()))
    }

    async fn fetch_game(&self, game: &GameId) -> Result<GameSnapshot, ClientError> {
        let games = self.games.lock().unwrap();
        match games.get(game.as_str()) {
            Some(board) => Ok(Self::snapshot(game.as_str(), *board)),
            None => Err(ApiError::status(404, "Game not found").into()),
        }
    }

    async fn submit_move(
        &self,
        game: &GameId,
        _player: &UserId,
        index: usize,
    ) -> Result<GameSnapshot, ClientError> {
        let mut games = self.games.lock().unwrap();
        let Some(board) = games.get_mut(game.as_str()) else {
            return Err(ApiError::status(404, "Game not found").into());
        };
        if !board.is_vacant(index) || board.outcome().is_concluded() {
            return Err(ApiError::status(400, "Invalid move").into());
        }
        let mark = *Self::snapshot(game.as_str(), *board).next();
        let mut cells = *board.cells();
        cells[index] = Cell::Occupied(mark);
        *board = Board::from(cells);
        Ok(Self::snapshot(game.as_str(), *board))
    }

    async fn list_games(&self, _user: &UserId) -> Result<Vec<MatchHistoryEntry>, ClientError> {
        let games = self.games.lock().unwrap();
        let mut ids: Vec<&String> = games.keys().collect();
        ids.sort();
        Ok(ids
            .into_iter()
            .map(|id| {
                let status = match *Self::snapshot(id, games[id]).winner() {
                    Some(winner) => MatchStatus::Finished(winner),
                    None => MatchStatus::InProgress,
                };
                MatchHistoryEntry::new(GameId::new(id.as_str()), status)
            })
            .collect())
    }
}

fn controller(dir: &TempDir) -> SessionController {
    SessionController::new(SessionStore::new(dir.path().join("session.json")), Theme::Dark)
}

/// Dispatches an intent and applies its completion, if a request was issued.
async fn drive(controller: &mut SessionController, backend: &FakeBackend, intent: Intent) -> bool {
    match controller.dispatch(intent) {
        Some(ticket) => {
            let completion = execute(backend, ticket).await;
            controller.apply(completion);
            true
        }
        None => false,
    }
}

#[tokio::test]
async fn test_full_game_flow() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let backend = FakeBackend::default();
    let mut controller = controller(&dir);

    assert!(drive(&mut controller, &backend, Intent::Login("ada".into())).await);
    assert_eq!(controller.state().phase(), Phase::Idle);
    assert_eq!(controller.state().user().map(|u| u.id().as_str()), Some("u-ada"));

    assert!(drive(&mut controller, &backend, Intent::NewGame).await);
    assert_eq!(controller.state().phase(), Phase::Playing);

    // X takes the top row while O plays the middle.
    for index in [0, 3, 1, 4, 2] {
        assert!(drive(&mut controller, &backend, Intent::Move(index)).await);
    }

    let state = controller.state();
    assert_eq!(state.phase(), Phase::Concluded);
    let game = state.game().as_ref().expect("game open");
    assert_eq!(
        game.result().map(|r| *r.winner()),
        Some(Winner::Mark(Mark::X))
    );
    assert_eq!(game.highlight().map(|l| l.indices()), Some([0, 1, 2]));

    // Finished board accepts nothing.
    assert!(!drive(&mut controller, &backend, Intent::Move(8)).await);

    assert!(drive(&mut controller, &backend, Intent::NewGame).await);
    assert_eq!(controller.state().phase(), Phase::Playing);
    assert_eq!(
        controller
            .state()
            .game()
            .as_ref()
            .map(|g| g.snapshot().id().as_str()),
        Some("g2")
    );

    assert!(!drive(&mut controller, &backend, Intent::Logout).await);
    assert_eq!(controller.state().phase(), Phase::Unauthenticated);
    assert!(controller.state().game().is_none());
}

#[tokio::test]
async fn test_refresh_picks_up_opponent_move() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let backend = FakeBackend::default();
    let mut controller = controller(&dir);

    drive(&mut controller, &backend, Intent::Login("ada".into())).await;
    drive(&mut controller, &backend, Intent::NewGame).await;
    drive(&mut controller, &backend, Intent::Move(0)).await;
    let next = |c: &SessionController| c.state().game().as_ref().map(|g| *g.snapshot().next());
    assert_eq!(next(&controller), Some(Mark::O));

    // The other player moves on the server; the client has not seen it yet.
    backend.opponent_moves("g1", 4);
    let board = |c: &SessionController| {
        c.state()
            .game()
            .as_ref()
            .map(|g| *g.snapshot().board())
            .expect("game open")
    };
    assert_eq!(board(&controller).get(4), Some(Cell::Empty));

    assert!(drive(&mut controller, &backend, Intent::Refresh).await);
    assert_eq!(board(&controller).get(4), Some(Cell::Occupied(Mark::O)));
    assert_eq!(next(&controller), Some(Mark::X));
    assert_eq!(controller.state().phase(), Phase::Playing);
    assert!(!*controller.state().fetching());
}

#[tokio::test]
async fn test_occupied_cell_issues_no_request() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let backend = FakeBackend::default();
    let mut controller = controller(&dir);

    drive(&mut controller, &backend, Intent::Login("ada".into())).await;
    drive(&mut controller, &backend, Intent::NewGame).await;
    drive(&mut controller, &backend, Intent::Move(4)).await;

    assert!(!drive(&mut controller, &backend, Intent::Move(4)).await);
    assert!(controller.state().message().is_none());
}

#[tokio::test]
async fn test_login_failure_falls_back_to_username() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let backend = FakeBackend::login_down();
    let mut controller = controller(&dir);

    assert!(drive(&mut controller, &backend, Intent::Signup("  bob ".into())).await);

    let state = controller.state();
    assert_eq!(state.phase(), Phase::Idle);
    let user = state.user().expect("signed in");
    assert_eq!(user.id().as_str(), "bob");
    assert_eq!(user.username(), "bob");
    assert!(
        state
            .message()
            .as_deref()
            .is_some_and(|m| m.contains("continuing as bob"))
    );
}

#[tokio::test]
async fn test_empty_username_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut controller = controller(&dir);

    assert!(controller.dispatch(Intent::Login("   ".into())).is_none());
    assert_eq!(controller.state().message().as_deref(), Some("Enter a username"));
}

#[tokio::test]
async fn test_response_after_logout_is_ignored() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let backend = FakeBackend::default();
    let mut controller = controller(&dir);

    drive(&mut controller, &backend, Intent::Login("ada".into())).await;
    let ticket = controller.dispatch(Intent::NewGame).expect("ticket");
    let completion = execute(&backend, ticket).await;

    controller.dispatch(Intent::Logout);
    controller.apply(completion);

    assert_eq!(controller.state().phase(), Phase::Unauthenticated);
    assert!(controller.state().game().is_none());
    assert!(!*controller.state().fetching());
}

#[tokio::test]
async fn test_single_request_in_flight() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let backend = FakeBackend::default();
    let mut controller = controller(&dir);

    drive(&mut controller, &backend, Intent::Login("ada".into())).await;
    drive(&mut controller, &backend, Intent::NewGame).await;

    let first = controller.dispatch(Intent::Move(0)).expect("first move issued");
    assert!(*controller.state().fetching());
    assert!(controller.dispatch(Intent::Move(1)).is_none());
    assert!(controller.dispatch(Intent::Refresh).is_none());

    controller.apply(execute(&backend, first).await);
    assert!(!*controller.state().fetching());
    assert!(controller.dispatch(Intent::Move(1)).is_some());
}

#[tokio::test]
async fn test_server_error_sets_message() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let backend = FakeBackend::default();
    let mut controller = controller(&dir);

    drive(&mut controller, &backend, Intent::Login("ada".into())).await;
    assert!(drive(&mut controller, &backend, Intent::JoinGame("missing".into())).await);

    assert_eq!(controller.state().phase(), Phase::Idle);
    assert_eq!(
        controller.state().message().as_deref(),
        Some("Server returned 404: Game not found")
    );
}

#[tokio::test]
async fn test_join_and_history() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let backend = FakeBackend::default();
    let mut controller = controller(&dir);

    drive(&mut controller, &backend, Intent::Login("ada".into())).await;
    drive(&mut controller, &backend, Intent::NewGame).await;
    drive(&mut controller, &backend, Intent::Move(4)).await;

    assert!(drive(&mut controller, &backend, Intent::LoadHistory).await);
    let history = controller.state().history().clone();
    assert_eq!(history.len(), 1);
    assert_eq!(*history[0].status(), MatchStatus::InProgress);

    drive(&mut controller, &backend, Intent::Logout).await;
    drive(&mut controller, &backend, Intent::Login("ada".into())).await;
    assert!(drive(&mut controller, &backend, Intent::JoinGame(" g1 ".into())).await);
    let game = controller.state().game().as_ref().expect("joined");
    assert_eq!(game.snapshot().board().get(4), Some(Cell::Occupied(Mark::X)));
}

#[tokio::test]
async fn test_session_restored_from_store() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let backend = FakeBackend::default();

    let mut first = controller(&dir);
    drive(&mut first, &backend, Intent::Login("ada".into())).await;

    let mut second = controller(&dir);
    second.restore();
    assert_eq!(second.state().phase(), Phase::Idle);
    assert_eq!(second.state().user().map(|u| u.username().as_str()), Some("ada"));

    second.dispatch(Intent::Logout);
    let mut third = controller(&dir);
    third.restore();
    assert_eq!(third.state().phase(), Phase::Unauthenticated);
}

#[tokio::test]
async fn test_theme_toggles_without_request() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut controller = controller(&dir);

    assert!(controller.dispatch(Intent::ToggleTheme).is_none());
    assert_eq!(*controller.state().theme(), Theme::Light);
}
