//! Terminal application: picks the screen for the session phase and runs
//! the event loop.

use std::ops::ControlFlow;
use std::sync::Arc;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use ratatui::{Frame, Terminal, backend::Backend, layout::Rect};
use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::screen::{Action, Screen};
use super::screens::{GameScreen, HistoryScreen, LobbyScreen, LoginScreen};
use crate::api::GameBackend;
use crate::session::{Completion, Phase, Ticket, execute};
use crate::{AppState, Intent, SessionController};

/// Outcome of an input event: quit, or continue with an optional request.
pub type Flow = ControlFlow<(), Option<Ticket>>;

/// Screen currently shown.
#[derive(Debug)]
enum ActiveScreen {
    Login(LoginScreen),
    Lobby(LobbyScreen),
    Game(GameScreen),
    History(HistoryScreen),
}

impl ActiveScreen {
    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::Login(s) => s,
            Self::Lobby(s) => s,
            Self::Game(s) => s,
            Self::History(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Login(s) => s,
            Self::Lobby(s) => s,
            Self::Game(s) => s,
            Self::History(s) => s,
        }
    }
}

/// Drives the screens from a [`SessionController`].
///
/// The visible screen is derived from the session phase after every
/// event; screens keep their local state only while they stay visible.
#[derive(Debug)]
pub struct TuiApp {
    controller: SessionController,
    screen: ActiveScreen,
    showing_history: bool,
    history_pending: bool,
}

impl TuiApp {
    /// Wraps a controller. Call [`SessionController::restore`] first to
    /// resume a stored session.
    pub fn new(controller: SessionController) -> Self {
        let mut app = Self {
            controller,
            screen: ActiveScreen::Login(LoginScreen::new()),
            showing_history: false,
            history_pending: false,
        };
        app.sync_screen();
        app
    }

    /// Current application state.
    pub fn state(&self) -> &AppState {
        self.controller.state()
    }

    /// Name of the visible screen.
    pub fn screen_name(&self) -> &'static str {
        match self.screen {
            ActiveScreen::Login(_) => "login",
            ActiveScreen::Lobby(_) => "lobby",
            ActiveScreen::Game(_) => "game",
            ActiveScreen::History(_) => "history",
        }
    }

    /// Renders the visible screen.
    pub fn draw(&self, frame: &mut Frame) {
        self.screen.as_screen().render(frame, self.controller.state());
    }

    /// Routes a key press to the visible screen.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return ControlFlow::Break(());
        }
        let action = self
            .screen
            .as_screen_mut()
            .handle_key(key, self.controller.state());
        self.handle_action(action)
    }

    /// Routes a left click to the visible screen. `area` is the terminal.
    #[instrument(skip(self))]
    pub fn handle_click(&mut self, area: Rect, column: u16, row: u16) -> Flow {
        let action = self
            .screen
            .as_screen_mut()
            .handle_click(area, column, row, self.controller.state());
        self.handle_action(action)
    }

    /// Feeds a finished request back into the session.
    ///
    /// Returns the history load deferred while another request was in
    /// flight, once the session is free to send it.
    #[instrument(skip_all)]
    pub fn apply(&mut self, completion: Completion) -> Option<Ticket> {
        self.controller.apply(completion);
        self.sync_screen();
        if !self.history_pending || *self.controller.state().fetching() {
            return None;
        }
        self.history_pending = false;
        debug!("Sending deferred history load");
        self.controller.dispatch(Intent::LoadHistory)
    }

    fn handle_action(&mut self, action: Action) -> Flow {
        debug!(?action, "Handling action");
        let ticket = match action {
            Action::Stay => None,
            Action::Quit => {
                info!("Quitting");
                return ControlFlow::Break(());
            }
            Action::ShowHistory => {
                self.showing_history = true;
                let ticket = self.controller.dispatch(Intent::LoadHistory);
                if ticket.is_none() && *self.controller.state().fetching() {
                    debug!("Request in flight, deferring history load");
                    self.history_pending = true;
                }
                ticket
            }
            Action::CloseHistory => {
                self.showing_history = false;
                self.history_pending = false;
                None
            }
            Action::Intent(intent) => {
                if matches!(
                    intent,
                    Intent::NewGame | Intent::JoinGame(_) | Intent::Logout
                ) {
                    self.showing_history = false;
                    self.history_pending = false;
                }
                self.controller.dispatch(intent)
            }
        };
        self.sync_screen();
        ControlFlow::Continue(ticket)
    }

    /// Replaces the screen when the phase calls for a different one.
    fn sync_screen(&mut self) {
        let phase = self.controller.state().phase();
        if phase == Phase::Unauthenticated {
            self.showing_history = false;
            self.history_pending = false;
        }
        let next = match (phase, self.showing_history, &self.screen) {
            (Phase::Unauthenticated, _, ActiveScreen::Login(_)) => None,
            (Phase::Unauthenticated, _, _) => Some(ActiveScreen::Login(LoginScreen::new())),
            (_, true, ActiveScreen::History(_)) => None,
            (_, true, _) => Some(ActiveScreen::History(HistoryScreen::new())),
            (Phase::Idle, false, ActiveScreen::Lobby(_)) => None,
            (Phase::Idle, false, _) => Some(ActiveScreen::Lobby(LobbyScreen::new())),
            (Phase::Playing | Phase::Concluded, false, ActiveScreen::Game(_)) => None,
            (Phase::Playing | Phase::Concluded, false, _) => {
                Some(ActiveScreen::Game(GameScreen::new()))
            }
        };
        if let Some(screen) = next {
            self.screen = screen;
            debug!(screen = self.screen_name(), "Screen changed");
        }
    }

    /// Runs the event loop until the user quits.
    ///
    /// Requests run on spawned tasks; their completions are applied on the
    /// next tick so input stays responsive while the server is slow.
    #[instrument(skip_all)]
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        backend: Arc<dyn GameBackend>,
    ) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting event loop");
        let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();

        let spawn = |ticket: Ticket| {
            let backend = Arc::clone(&backend);
            let tx = tx.clone();
            tokio::spawn(async move {
                let completion = execute(backend.as_ref(), ticket).await;
                if tx.send(completion).is_err() {
                    warn!("Event loop gone before request finished");
                }
            });
        };

        loop {
            while let Ok(completion) = rx.try_recv() {
                if let Some(ticket) = self.apply(completion) {
                    spawn(ticket);
                }
            }

            terminal.draw(|frame| self.draw(frame))?;

            if !event::poll(Duration::from_millis(50))? {
                continue;
            }

            let flow = match event::read()? {
                // Skip key release events (crossterm fires both press and release).
                Event::Key(key) if key.kind == KeyEventKind::Release => continue,
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    let size = terminal.size()?;
                    let area = Rect::new(0, 0, size.width, size.height);
                    self.handle_click(area, mouse.column, mouse.row)
                }
                _ => ControlFlow::Continue(None),
            };

            match flow {
                ControlFlow::Break(()) => return Ok(()),
                ControlFlow::Continue(Some(ticket)) => spawn(ticket),
                ControlFlow::Continue(None) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SessionStore;
    use crate::Theme;

    fn app() -> TuiApp {
        let store = SessionStore::new(std::env::temp_dir().join("tictactoe-app-test-unused.json"));
        TuiApp::new(SessionController::new(store, Theme::Dark))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_starts_on_login() {
        assert_eq!(app().screen_name(), "login");
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        let flow = app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(flow, ControlFlow::Break(()));
    }

    #[test]
    fn test_login_enter_issues_ticket() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('a')));
        let flow = app.handle_key(key(KeyCode::Enter));
        match flow {
            ControlFlow::Continue(Some(ticket)) => assert_eq!(ticket.epoch, 0),
            other => panic!("expected a ticket, got {other:?}"),
        }
        assert!(*app.state().fetching());
    }
}
