//! Client error type.

use derive_more::{Display, Error, From};
use tictactoe_board::{BoardError, BoardErrorKind};

use crate::api::ApiError;
use crate::store::StoreError;

/// Error raised by a user action.
///
/// None of these are fatal; the controller turns them into a short
/// message via [`ClientError::user_message`].
#[derive(Debug, Clone, Display, Error, From)]
pub enum ClientError {
    /// Transport failure or non-success response.
    #[display("{_0}")]
    Api(ApiError),
    /// The server sent a malformed board or mark.
    #[display("{_0}")]
    Board(BoardError),
    /// The session file could not be read or written.
    #[display("{_0}")]
    Store(StoreError),
}

impl ClientError {
    /// Short message for the message area.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api(err) => err.message.clone(),
            ClientError::Board(err) => match err.kind() {
                BoardErrorKind::InvalidBoardShape { len } => {
                    format!("Server sent a board with {} cells", len)
                }
                other => format!("Server sent invalid game data: {}", other),
            },
            ClientError::Store(err) => err.message.clone(),
        }
    }

    /// HTTP status of the failed request, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api(err) => err.status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_errors_read_as_bad_server_data() {
        let short = ClientError::from(BoardError::new(BoardErrorKind::InvalidBoardShape {
            len: 8,
        }));
        assert_eq!(short.user_message(), "Server sent a board with 8 cells");
        assert_eq!(short.status(), None);

        let mark = ClientError::from(BoardError::new(BoardErrorKind::InvalidMark {
            value: "Z".to_string(),
        }));
        assert_eq!(
            mark.user_message(),
            "Server sent invalid game data: unrecognized mark \"Z\""
        );
    }

    #[test]
    fn test_api_error_keeps_status() {
        let err = ClientError::from(ApiError::status(503, "down"));
        assert_eq!(err.status(), Some(503));
        assert!(err.user_message().starts_with("Server returned 503"));
    }
}
