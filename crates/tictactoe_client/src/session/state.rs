//! Application state owned by the session controller.

use derive_getters::Getters;
use tictactoe_board::{Outcome, WinLine};
use tracing::{instrument, warn};

use crate::Theme;
use crate::api::{GameId, GameSnapshot, MatchHistoryEntry, User, Winner};

/// Coarse session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nobody is signed in.
    Unauthenticated,
    /// Signed in, no game open.
    Idle,
    /// A game is open and the server reports no winner.
    Playing,
    /// The open game has a winner or is drawn.
    Concluded,
}

/// Concluded result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct GameResult {
    winner: Winner,
    line: Option<WinLine>,
}

/// Latest server snapshot plus the result resolved from it.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ActiveGame {
    snapshot: GameSnapshot,
    result: Option<GameResult>,
}

impl ActiveGame {
    /// Resolves the result of a snapshot.
    ///
    /// The server's `winner` is authoritative. Its `win_line` is used when
    /// present; otherwise the line is derived locally and kept only when
    /// the local derivation names the same winner.
    #[instrument(skip(snapshot), fields(game_id = %snapshot.id()))]
    pub fn reconcile(snapshot: GameSnapshot) -> Self {
        let local = snapshot.board().outcome();
        let result = match *snapshot.winner() {
            None => {
                if local.is_concluded() {
                    warn!(?local, "Server reports no winner but the board is decided");
                }
                if !next_is_plausible(&snapshot) {
                    warn!(next = %snapshot.next(), "Server turn disagrees with the mark counts");
                }
                None
            }
            Some(Winner::Draw) => {
                if let Outcome::Win { mark, .. } = local {
                    warn!(%mark, "Server reports a draw but the board shows a win");
                }
                Some(GameResult {
                    winner: Winner::Draw,
                    line: None,
                })
            }
            Some(Winner::Mark(mark)) => {
                let line = snapshot.win_line().or_else(|| match local {
                    Outcome::Win { mark: local_mark, line } if local_mark == mark => Some(line),
                    _ => {
                        warn!(%mark, ?local, "Server winner disagrees with the board");
                        None
                    }
                });
                Some(GameResult {
                    winner: Winner::Mark(mark),
                    line,
                })
            }
        };
        Self { snapshot, result }
    }

    /// True once the server has reported a winner or a draw.
    pub fn is_concluded(&self) -> bool {
        self.result.is_some()
    }

    /// Cells to highlight, if the game was won on a known line.
    pub fn highlight(&self) -> Option<WinLine> {
        self.result.and_then(|result| result.line)
    }
}

/// The player to move never has more marks on the board than the other.
#[instrument(skip(snapshot))]
fn next_is_plausible(snapshot: &GameSnapshot) -> bool {
    let next = *snapshot.next();
    snapshot.board().count(next) <= snapshot.board().count(next.opponent())
}

/// Signed-in user and the game they have open.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Session {
    user: User,
    game_id: Option<GameId>,
}

impl Session {
    /// A fresh session with no game open.
    pub fn new(user: User) -> Self {
        Self {
            user,
            game_id: None,
        }
    }
}

/// Everything the screens render from.
///
/// Mutated only by [`SessionController`](crate::SessionController).
#[derive(Debug, Clone, Getters)]
pub struct AppState {
    session: Option<Session>,
    game: Option<ActiveGame>,
    history: Vec<MatchHistoryEntry>,
    fetching: bool,
    message: Option<String>,
    theme: Theme,
    epoch: u64,
}

impl AppState {
    /// Signed-out state.
    pub fn new(theme: Theme) -> Self {
        Self {
            session: None,
            game: None,
            history: Vec::new(),
            fetching: false,
            message: None,
            theme,
            epoch: 0,
        }
    }

    /// Current phase, derived from the session and game.
    pub fn phase(&self) -> Phase {
        match (&self.session, &self.game) {
            (None, _) => Phase::Unauthenticated,
            (Some(_), None) => Phase::Idle,
            (Some(_), Some(game)) if game.is_concluded() => Phase::Concluded,
            (Some(_), Some(_)) => Phase::Playing,
        }
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(Session::user)
    }

    pub(crate) fn sign_in(&mut self, user: User) {
        self.session = Some(Session::new(user));
        self.game = None;
        self.history.clear();
    }

    /// Drops all session data and invalidates in-flight requests.
    pub(crate) fn sign_out(&mut self) {
        self.session = None;
        self.game = None;
        self.history.clear();
        self.fetching = false;
        self.message = None;
        self.epoch += 1;
    }

    pub(crate) fn show_game(&mut self, game: ActiveGame) {
        if let Some(session) = self.session.as_mut() {
            session.game_id = Some(game.snapshot().id().clone());
        }
        self.game = Some(game);
    }

    pub(crate) fn set_history(&mut self, history: Vec<MatchHistoryEntry>) {
        self.history = history;
    }

    pub(crate) fn set_fetching(&mut self, fetching: bool) {
        self.fetching = fetching;
    }

    pub(crate) fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }

    pub(crate) fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }
}
