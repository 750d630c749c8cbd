//! Game loop for Zilch.
//!
//! Seats players in the order decided by a roll-off, runs turns through
//! [`zilch_engine::run_turn`], keeps permanent scores, offers each player
//! the chance to build on the previous player's banked turn, and ends the
//! game with a final round once someone reaches the target score.

/// Game configuration and JSON loading.
pub mod config;
/// Error types for the game crate.
pub mod error;
/// Game event types and the event log.
pub mod event;
/// The game loop itself.
pub mod game;

pub use config::{FinalRound, GameConfig};
pub use error::{GameError, GameResult};
pub use event::{EventLog, GameEvent, GameEventKind};
pub use game::{Carry, Game, PlayerDecider, Standing, TurnReport};
