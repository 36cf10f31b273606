//! Session controller: turns user intents into backend requests and
//! reconciles completed requests into [`AppState`].

use tracing::{debug, info, instrument, warn};

use super::request::{Completion, Reply, Request, Ticket};
use super::state::{ActiveGame, AppState, Phase};
use crate::api::{GameId, User};
use crate::store::SessionStore;
use crate::view::GameView;
use crate::Theme;

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Sign in with a username.
    Login(String),
    /// Create an account.
    Signup(String),
    /// Start a new game.
    NewGame,
    /// Open an existing game by id.
    JoinGame(String),
    /// Play at a board index.
    Move(usize),
    /// Re-fetch the open game.
    Refresh,
    /// Fetch the match history.
    LoadHistory,
    /// Sign out and forget the stored session.
    Logout,
    /// Switch between light and dark.
    ToggleTheme,
}

/// Owns [`AppState`] and the session store.
///
/// Network intents become [`Ticket`]s; the caller executes them and feeds
/// the [`Completion`] back through [`SessionController::apply`]. Only one
/// ticket is outstanding at a time.
#[derive(Debug)]
pub struct SessionController {
    state: AppState,
    store: SessionStore,
}

impl SessionController {
    /// Creates a signed-out controller.
    pub fn new(store: SessionStore, theme: Theme) -> Self {
        Self {
            state: AppState::new(theme),
            store,
        }
    }

    /// Current state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Restores a stored user. Called once at startup.
    #[instrument(skip(self))]
    pub fn restore(&mut self) {
        match self.store.load() {
            Ok(Some(user)) => {
                info!(username = %user.username(), "Resuming stored session");
                self.state.sign_in(user);
            }
            Ok(None) => debug!("Starting signed out"),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable stored session");
                self.state.set_message(Some(e.message));
            }
        }
    }

    /// Validates an intent. Returns a ticket when a request must be made.
    #[instrument(skip(self), fields(phase = ?self.state.phase(), fetching = self.state.fetching()))]
    pub fn dispatch(&mut self, intent: Intent) -> Option<Ticket> {
        match intent {
            Intent::Logout => {
                self.logout();
                return None;
            }
            Intent::ToggleTheme => {
                self.state.toggle_theme();
                return None;
            }
            _ => {}
        }

        if *self.state.fetching() {
            debug!("Request already in flight");
            return None;
        }

        let request = match intent {
            Intent::Login(name) | Intent::Signup(name)
                if self.state.phase() != Phase::Unauthenticated =>
            {
                debug!(%name, "Already signed in");
                return None;
            }
            Intent::Login(name) => Request::Login {
                username: self.username(&name)?,
            },
            Intent::Signup(name) => Request::Signup {
                username: self.username(&name)?,
            },
            Intent::NewGame => Request::CreateGame {
                player: self.state.user()?.id().clone(),
            },
            Intent::JoinGame(id) => {
                self.state.user()?;
                let id = id.trim();
                if id.is_empty() {
                    self.state.set_message(Some("Enter a game id".to_string()));
                    return None;
                }
                Request::FetchGame {
                    game: GameId::new(id),
                }
            }
            Intent::Move(index) => {
                let view = GameView::from_state(&self.state)?;
                let intent = view.click(index)?;
                let game = self.state.game().as_ref()?.snapshot().id().clone();
                Request::Move {
                    game,
                    player: self.state.user()?.id().clone(),
                    index: intent.index,
                }
            }
            Intent::Refresh => Request::FetchGame {
                game: self.state.game().as_ref()?.snapshot().id().clone(),
            },
            Intent::LoadHistory => Request::History {
                user: self.state.user()?.id().clone(),
            },
            Intent::Logout | Intent::ToggleTheme => return None,
        };

        debug!(?request, "Issuing request");
        self.state.set_fetching(true);
        self.state.set_message(None);
        Some(Ticket {
            epoch: *self.state.epoch(),
            request,
        })
    }

    /// Reconciles a finished request.
    ///
    /// Completions issued before the latest logout are dropped. Snapshots
    /// replace the open game in arrival order.
    #[instrument(skip(self, completion), fields(epoch = completion.epoch))]
    pub fn apply(&mut self, completion: Completion) {
        if completion.epoch != *self.state.epoch() {
            debug!(request = ?completion.request, "Discarding stale response");
            return;
        }
        self.state.set_fetching(false);

        match (completion.request, completion.result) {
            (_, Ok(Reply::User(user))) => self.sign_in(user),
            (Request::Login { username } | Request::Signup { username }, Err(e)) => {
                warn!(error = %e, %username, "Login unavailable, continuing with username as id");
                self.sign_in(User::fallback(&username));
                self.state.set_message(Some(format!(
                    "Login service unavailable; continuing as {}",
                    username
                )));
            }
            (_, Ok(Reply::Game(snapshot))) => {
                if self.state.session().is_none() {
                    debug!("Dropping game for signed-out session");
                    return;
                }
                let game = ActiveGame::reconcile(snapshot);
                if let Some(result) = game.result() {
                    info!(winner = %result.winner(), "Game concluded");
                }
                self.state.show_game(game);
            }
            (_, Ok(Reply::History(history))) => {
                info!(count = history.len(), "Match history loaded");
                self.state.set_history(history);
            }
            (request, Err(e)) => {
                warn!(error = %e, ?request, "Request failed");
                self.state.set_message(Some(e.user_message()));
            }
        }
    }

    /// Signs out unconditionally.
    #[instrument(skip(self))]
    fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear stored session");
        }
        info!("Signed out");
        self.state.sign_out();
    }

    #[instrument(skip(self), fields(user = %user.username()))]
    fn sign_in(&mut self, user: User) {
        info!(username = %user.username(), user_id = %user.id(), "Signed in");
        if let Err(e) = self.store.save(&user) {
            warn!(error = %e, "Failed to persist session");
            self.state.set_message(Some(e.message.clone()));
        }
        self.state.sign_in(user);
    }

    #[instrument(skip(self))]
    fn username(&mut self, raw: &str) -> Option<String> {
        let name = raw.trim();
        if name.is_empty() {
            self.state.set_message(Some("Enter a username".to_string()));
            None
        } else {
            Some(name.to_string())
        }
    }
}
