//! Error types for the Zilch rules engine.

/// Errors that can occur during engine operations.
///
/// A Zilch is not an error: it is a regular turn outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZilchError {
    /// A die face outside 1..=6 was supplied.
    #[error("invalid die face: {0} (faces are 1-6)")]
    InvalidFace(u8),

    /// More dice than a game uses, or none at all, were requested.
    #[error("invalid dice count: {0} (must be 1-10)")]
    InvalidDiceCount(usize),

    /// A scoring option index does not reference an offered combination.
    #[error("invalid selection: option {index} of {available}")]
    InvalidSelection {
        /// The rejected zero-based index.
        index: usize,
        /// How many options were offered.
        available: usize,
    },

    /// A turn step was requested in a phase that does not allow it.
    #[error("cannot {action} while the turn is {phase}")]
    WrongPhase {
        /// The step that was attempted.
        action: &'static str,
        /// The phase the turn was in.
        phase: &'static str,
    },

    /// No players were given to order.
    #[error("no players to order")]
    NoPlayers,

    /// The same player appeared twice.
    #[error("duplicate player: {0}")]
    DuplicatePlayer(String),

    /// A scripted roller ran out of rolls.
    #[error("roll script exhausted")]
    ScriptExhausted,

    /// A scripted roll does not match the number of dice requested.
    #[error("scripted roll has {actual} dice, expected {expected}")]
    ScriptMismatch {
        /// Dice requested by the engine.
        expected: usize,
        /// Dice in the scripted roll.
        actual: usize,
    },

    /// A decision callback gave up (for example, its input was closed).
    #[error("decision aborted: {0}")]
    Aborted(String),
}

/// Convenience result type for engine operations.
pub type ZilchResult<T> = Result<T, ZilchError>;
