//! Match configuration.

use serde::{Deserialize, Serialize};

use super::board::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Errors loading or validating a [`MatchConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("board_size must be at least {min}, got {size}")]
    BoardTooSmall { size: usize, min: usize },

    #[error("board_size must be at most {max}, got {size}")]
    BoardTooLarge { size: usize, max: usize },

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings fixed for the lifetime of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Side length of the square board
    pub board_size: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
        }
    }
}

impl MatchConfig {
    pub fn with_board_size(board_size: usize) -> Self {
        Self { board_size }
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < MIN_BOARD_SIZE {
            return Err(ConfigError::BoardTooSmall {
                size: self.board_size,
                min: MIN_BOARD_SIZE,
            });
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardTooLarge {
                size: self.board_size,
                max: MAX_BOARD_SIZE,
            });
        }
        Ok(())
    }
}
