//! Move outcome messages.
//!
//! The outcome of an accepted local move is the only thing the two peers
//! exchange. [`OutcomeMessage`] is the loose wire shape (every field
//! optional except `status`); [`MoveOutcome`] is the checked form the match
//! state works with.
//!
//! ```text
//! {"status": "next", "marked_cell": [2, 3]}
//! {"status": "finished", "marked_cell": [0, 2], "winning_path": [[0, 0], [0, 1], [0, 2]]}
//! ```

use serde::{Deserialize, Serialize};

use super::board::{MoveError, Position};
use super::graph::WinningPath;

/// Declared status of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Game continues, turn passes
    Next,
    /// Mover connected their edges
    Finished,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Finished => "finished",
        }
    }
}

/// Errors decoding or applying a remote outcome.
#[derive(Debug, thiserror::Error)]
pub enum OutcomeError {
    #[error("\"{}\" outcome is missing `{field}`", .status.as_str())]
    MissingField {
        status: MatchStatus,
        field: &'static str,
    },

    #[error("winning path is empty")]
    EmptyPath,

    #[error("cell {0} is outside the board")]
    OutOfBounds(Position),

    #[error("cell {0} is already held by the other player")]
    CellConflict(Position),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("malformed outcome JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome message as it travels between peers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeMessage {
    #[serde(alias = "match_status")]
    pub status: MatchStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marked_cell: Option<Position>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winning_path: Option<WinningPath>,
}

impl OutcomeMessage {
    pub fn to_json(&self) -> Result<serde_json::Value, OutcomeError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String, OutcomeError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, OutcomeError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Checked outcome of a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Cell marked, turn passes to the other seat.
    Next { marked_cell: Position },
    /// Cell marked and the mover won.
    ///
    /// `marked_cell` is always set for locally produced outcomes; older peers
    /// may leave it out, in which case the path alone describes the move.
    Finished {
        marked_cell: Option<Position>,
        winning_path: WinningPath,
    },
}

impl MoveOutcome {
    pub fn status(&self) -> MatchStatus {
        match self {
            Self::Next { .. } => MatchStatus::Next,
            Self::Finished { .. } => MatchStatus::Finished,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }

    pub fn marked_cell(&self) -> Option<Position> {
        match self {
            Self::Next { marked_cell } => Some(*marked_cell),
            Self::Finished { marked_cell, .. } => *marked_cell,
        }
    }

    pub fn winning_path(&self) -> Option<&WinningPath> {
        match self {
            Self::Next { .. } => None,
            Self::Finished { winning_path, .. } => Some(winning_path),
        }
    }

    /// Every cell this outcome asks the receiver to mark for the mover.
    pub fn cells_to_mark(&self) -> Vec<Position> {
        match self {
            Self::Next { marked_cell } => vec![*marked_cell],
            Self::Finished {
                marked_cell: Some(cell),
                ..
            } => vec![*cell],
            Self::Finished {
                marked_cell: None,
                winning_path,
            } => winning_path.cells().to_vec(),
        }
    }

    /// Wire form of this outcome.
    pub fn to_message(&self) -> OutcomeMessage {
        match self {
            Self::Next { marked_cell } => OutcomeMessage {
                status: MatchStatus::Next,
                marked_cell: Some(*marked_cell),
                winning_path: None,
            },
            Self::Finished {
                marked_cell,
                winning_path,
            } => OutcomeMessage {
                status: MatchStatus::Finished,
                marked_cell: *marked_cell,
                winning_path: Some(winning_path.clone()),
            },
        }
    }
}

impl From<MoveOutcome> for OutcomeMessage {
    fn from(outcome: MoveOutcome) -> Self {
        outcome.to_message()
    }
}

impl TryFrom<OutcomeMessage> for MoveOutcome {
    type Error = OutcomeError;

    fn try_from(message: OutcomeMessage) -> Result<Self, Self::Error> {
        match message.status {
            MatchStatus::Next => {
                let marked_cell = message.marked_cell.ok_or(OutcomeError::MissingField {
                    status: MatchStatus::Next,
                    field: "marked_cell",
                })?;
                Ok(Self::Next { marked_cell })
            }
            MatchStatus::Finished => {
                let winning_path = message.winning_path.ok_or(OutcomeError::MissingField {
                    status: MatchStatus::Finished,
                    field: "winning_path",
                })?;
                if winning_path.is_empty() {
                    return Err(OutcomeError::EmptyPath);
                }
                Ok(Self::Finished {
                    marked_cell: message.marked_cell,
                    winning_path,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_path() -> WinningPath {
        WinningPath::new(vec![
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(0, 2),
        ])
    }

    #[test]
    fn test_next_message_json() {
        let outcome = MoveOutcome::Next {
            marked_cell: Position::new(2, 3),
        };
        let raw = outcome.to_message().to_json_string().unwrap();
        assert_eq!(raw, r#"{"status":"next","marked_cell":[2,3]}"#);
    }

    #[test]
    fn test_finished_message_json() {
        let outcome = MoveOutcome::Finished {
            marked_cell: Some(Position::new(0, 2)),
            winning_path: sample_path(),
        };
        assert_eq!(
            outcome.to_message().to_json().unwrap(),
            serde_json::json!({
                "status": "finished",
                "marked_cell": [0, 2],
                "winning_path": [[0, 0], [0, 1], [0, 2]]
            })
        );
    }

    #[test]
    fn test_decode_accepts_match_status_alias() {
        let message = OutcomeMessage::from_json_str(
            r#"{"match_status": "finished", "winning_path": [[1, 0], [0, 1]]}"#,
        )
        .unwrap();
        let outcome = MoveOutcome::try_from(message).unwrap();

        assert!(outcome.is_finished());
        assert_eq!(outcome.marked_cell(), None);
        assert_eq!(
            outcome.cells_to_mark(),
            vec![Position::new(1, 0), Position::new(0, 1)]
        );
    }

    #[test]
    fn test_next_without_cell_is_malformed() {
        let message = OutcomeMessage::from_json_str(r#"{"status": "next"}"#).unwrap();
        let err = MoveOutcome::try_from(message).unwrap_err();
        assert!(matches!(
            err,
            OutcomeError::MissingField {
                status: MatchStatus::Next,
                field: "marked_cell"
            }
        ));
        assert_eq!(err.to_string(), "\"next\" outcome is missing `marked_cell`");
    }

    #[test]
    fn test_finished_without_path_is_malformed() {
        let message = OutcomeMessage {
            status: MatchStatus::Finished,
            marked_cell: Some(Position::new(1, 1)),
            winning_path: None,
        };
        assert!(matches!(
            MoveOutcome::try_from(message),
            Err(OutcomeError::MissingField {
                field: "winning_path",
                ..
            })
        ));
    }

    #[test]
    fn test_finished_with_empty_path_is_malformed() {
        let message = OutcomeMessage {
            status: MatchStatus::Finished,
            marked_cell: None,
            winning_path: Some(WinningPath::new(vec![])),
        };
        assert!(matches!(
            MoveOutcome::try_from(message),
            Err(OutcomeError::EmptyPath)
        ));
    }

    #[test]
    fn test_unknown_status_is_json_error() {
        let err = OutcomeMessage::from_json_str(r#"{"status": "paused"}"#).unwrap_err();
        assert!(matches!(err, OutcomeError::Json(_)));
    }

    #[test]
    fn test_message_survives_the_wire() {
        let outcome = MoveOutcome::Finished {
            marked_cell: Some(Position::new(0, 2)),
            winning_path: sample_path(),
        };
        let raw = outcome.to_message().to_json_string().unwrap();
        let decoded = MoveOutcome::try_from(OutcomeMessage::from_json_str(&raw).unwrap()).unwrap();
        assert_eq!(decoded, outcome);
    }
}
