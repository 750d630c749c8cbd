//! Error types for the game loop.

use thiserror::Error;

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors that can occur while setting up or playing a game.
#[derive(Debug, Error)]
pub enum GameError {
    /// A player name was empty.
    #[error("player names must not be empty")]
    EmptyName,

    /// The configuration is unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for a config.
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A turn was requested after the game ended.
    #[error("the game is over")]
    GameOver,

    /// Rules engine error.
    #[error("{0}")]
    Engine(#[from] zilch_engine::ZilchError),
}
