//! JSON shapes exchanged with the backend and their typed forms.

use derive_getters::Getters;
use derive_more::Display;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tictactoe_board::{Board, BoardError, BoardErrorKind, Cell, Mark, WinLine};
use tracing::{instrument, warn};

/// Ids arrive as JSON strings or numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(i64),
}

impl From<IdRepr> for String {
    fn from(repr: IdRepr) -> Self {
        match repr {
            IdRepr::Text(text) => text,
            IdRepr::Number(number) => number.to_string(),
        }
    }
}

/// Backend user id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(from = "IdRepr", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Wraps a raw id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<IdRepr> for UserId {
    fn from(repr: IdRepr) -> Self {
        Self(repr.into())
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Backend game id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(from = "IdRepr", into = "String")]
pub struct GameId(String);

impl GameId {
    /// Wraps a raw id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<IdRepr> for GameId {
    fn from(repr: IdRepr) -> Self {
        Self(repr.into())
    }
}

impl From<GameId> for String {
    fn from(id: GameId) -> Self {
        id.0
    }
}

/// Authenticated user; also the record persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct User {
    /// Backend id.
    id: UserId,
    /// Display name.
    username: String,
}

impl User {
    /// Stand-in used when the login endpoint is unavailable: the username
    /// doubles as the id.
    #[instrument]
    pub fn fallback(username: &str) -> Self {
        Self::new(UserId::new(username), username.to_string())
    }
}

/// Body of `POST /users/signup` and `POST /users/login`.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialsBody<'a> {
    /// Requested username.
    pub username: &'a str,
}

/// Body of `POST /games`.
#[derive(Debug, Clone, Serialize)]
pub struct NewGameBody<'a> {
    /// Creating player.
    pub player: &'a UserId,
}

/// Body of `POST /games/{id}/move`.
#[derive(Debug, Clone, Serialize)]
pub struct MoveBody<'a> {
    /// Moving player.
    pub player: &'a UserId,
    /// Board index 0-8.
    pub move_index: usize,
}

/// Game state exactly as the backend sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateBody {
    /// Game id.
    pub id: GameId,
    /// Cells in row-major order; length is validated on conversion.
    pub state: Vec<Cell>,
    /// Mark to move next.
    pub next: Mark,
    /// `"X"`, `"O"`, `"draw"`, or empty/absent while in progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    /// Winning triple, when the server reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_line: Option<Vec<usize>>,
}

/// Final result reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Winner {
    /// A mark won.
    #[display("{_0}")]
    Mark(Mark),
    /// Nobody won.
    #[display("draw")]
    Draw,
}

impl Winner {
    /// Parses a `winner` field. Empty or blank means the game is still running.
    #[instrument]
    pub fn parse(value: &str) -> Result<Option<Self>, BoardError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        if value.eq_ignore_ascii_case("draw") {
            return Ok(Some(Winner::Draw));
        }
        Mark::parse(value)
            .map(|mark| Some(Winner::Mark(mark)))
            .ok_or_else(|| {
                BoardError::new(BoardErrorKind::InvalidMark {
                    value: value.to_string(),
                })
            })
    }
}

/// Validated game state.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameSnapshot {
    id: GameId,
    board: Board,
    next: Mark,
    winner: Option<Winner>,
    win_line: Option<WinLine>,
}

impl GameSnapshot {
    /// Builds a snapshot from already-typed parts.
    pub fn new(
        id: GameId,
        board: Board,
        next: Mark,
        winner: Option<Winner>,
        win_line: Option<WinLine>,
    ) -> Self {
        Self {
            id,
            board,
            next,
            winner,
            win_line,
        }
    }
}

impl TryFrom<GameStateBody> for GameSnapshot {
    type Error = BoardError;

    /// Rejects boards that are not nine cells long and unknown winners.
    /// A win line that is not one of the eight is dropped so the local
    /// derivation can stand in for it.
    fn try_from(body: GameStateBody) -> Result<Self, Self::Error> {
        let board = Board::from_cells(&body.state)?;
        let winner = match body.winner.as_deref() {
            Some(raw) => Winner::parse(raw)?,
            None => None,
        };
        let win_line = body
            .win_line
            .and_then(|indices| match WinLine::from_indices(&indices) {
                Ok(line) => Some(line),
                Err(e) => {
                    warn!(game_id = %body.id, error = %e, "Ignoring unrecognized win line");
                    None
                }
            });
        Ok(Self {
            id: body.id,
            board,
            next: body.next,
            winner,
            win_line,
        })
    }
}

/// One row of `GET /users/{id}/games`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItemBody {
    /// Game id.
    pub id: GameId,
    /// Same encoding as [`GameStateBody::winner`].
    #[serde(default)]
    pub winner: Option<String>,
}

/// `GET /users/{id}/games` answers either shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HistoryBody {
    /// `{"games": [...]}`
    Wrapped {
        /// The rows.
        games: Vec<HistoryItemBody>,
    },
    /// `[...]`
    Bare(Vec<HistoryItemBody>),
}

impl HistoryBody {
    /// The rows, whichever shape they came in.
    pub fn into_items(self) -> Vec<HistoryItemBody> {
        match self {
            HistoryBody::Wrapped { games } => games,
            HistoryBody::Bare(games) => games,
        }
    }
}

/// Status of a past or running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MatchStatus {
    /// Still being played.
    #[display("in progress")]
    InProgress,
    /// Concluded.
    #[display("{_0}")]
    Finished(Winner),
}

/// Read-only match history row.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct MatchHistoryEntry {
    game_id: GameId,
    status: MatchStatus,
}

impl TryFrom<HistoryItemBody> for MatchHistoryEntry {
    type Error = BoardError;

    fn try_from(item: HistoryItemBody) -> Result<Self, Self::Error> {
        let status = match item.winner.as_deref() {
            Some(raw) => Winner::parse(raw)?.map_or(MatchStatus::InProgress, MatchStatus::Finished),
            None => MatchStatus::InProgress,
        };
        Ok(Self::new(item.id, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_accept_numbers_and_strings() {
        let user: User = serde_json::from_str(r#"{"id": 42, "username": "ada"}"#).unwrap();
        assert_eq!(user.id().as_str(), "42");
        let user: User = serde_json::from_str(r#"{"id": "u-1", "username": "ada"}"#).unwrap();
        assert_eq!(user.id().as_str(), "u-1");
    }

    #[test]
    fn test_user_serializes_id_as_string() {
        let user = User::new(UserId::new("7"), "ada".to_string());
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"id": "7", "username": "ada"}));
    }

    #[test]
    fn test_winner_parse() {
        assert_eq!(Winner::parse("").unwrap(), None);
        assert_eq!(Winner::parse("  ").unwrap(), None);
        assert_eq!(Winner::parse("Draw").unwrap(), Some(Winner::Draw));
        assert_eq!(Winner::parse("O").unwrap(), Some(Winner::Mark(Mark::O)));
        assert!(Winner::parse("nobody").is_err());
    }

    #[test]
    fn test_snapshot_from_body() {
        let body: GameStateBody = serde_json::from_str(
            r#"{"id": 3, "state": ["X","X","X","O","O",null,null,null,null],
                "next": "O", "winner": "X", "win_line": [2, 1, 0]}"#,
        )
        .unwrap();
        let snapshot = GameSnapshot::try_from(body).unwrap();
        assert_eq!(snapshot.id().as_str(), "3");
        assert_eq!(*snapshot.winner(), Some(Winner::Mark(Mark::X)));
        assert_eq!(snapshot.win_line().map(|l| l.indices()), Some([0, 1, 2]));
    }

    #[test]
    fn test_blank_winner_means_in_progress() {
        let body: GameStateBody = serde_json::from_str(
            r#"{"id": "g", "state": ["X",null,null,null,"O",null,null,null,null],
                "next": "X", "winner": " "}"#,
        )
        .unwrap();
        let snapshot = GameSnapshot::try_from(body).unwrap();
        assert_eq!(*snapshot.winner(), None);
    }

    #[test]
    fn test_snapshot_drops_unknown_win_line() {
        let body: GameStateBody = serde_json::from_str(
            r#"{"id": "g", "state": ["X","X","X","O","O",null,null,null,null],
                "next": "O", "winner": "X", "win_line": [0, 1, 5]}"#,
        )
        .unwrap();
        let snapshot = GameSnapshot::try_from(body).unwrap();
        assert_eq!(*snapshot.win_line(), None);
    }

    #[test]
    fn test_snapshot_rejects_short_board() {
        let body: GameStateBody =
            serde_json::from_str(r#"{"id": "g", "state": [null, null], "next": "X"}"#).unwrap();
        let err = GameSnapshot::try_from(body).unwrap_err();
        assert!(err.is_invalid_shape());
    }

    #[test]
    fn test_history_both_shapes() {
        let wrapped: HistoryBody =
            serde_json::from_str(r#"{"games": [{"id": 1, "winner": "draw"}]}"#).unwrap();
        let bare: HistoryBody = serde_json::from_str(r#"[{"id": 1}, {"id": 2, "winner": ""}]"#).unwrap();
        assert_eq!(wrapped.into_items().len(), 1);
        let rows: Vec<MatchHistoryEntry> = bare
            .into_items()
            .into_iter()
            .map(|item| MatchHistoryEntry::try_from(item).unwrap())
            .collect();
        assert!(rows.iter().all(|row| *row.status() == MatchStatus::InProgress));
    }
}
