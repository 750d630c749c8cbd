//! Rules engine for Zilch, a ten-dice push-your-luck scoring game.
//!
//! Provides dice multisets and rollers, the scoring-combination
//! enumerator, the turn state machine (locked, inherited and at-risk
//! points, hot dice, Zilch), and the tie-break protocol that decides the
//! playing order. Everything here is synchronous and free of I/O; player
//! decisions come in through the [`TurnDecider`] trait.

pub mod dice;
pub mod error;
pub mod order;
pub mod scoring;
pub mod turn;

pub use dice::{DiceRoller, DiceSet, MAX_DICE, RandomRoller, ScriptedRoller};
pub use error::{ZilchError, ZilchResult};
pub use order::{OrderMode, PlayerOrder, RollOff};
pub use scoring::{GroupScoring, ScoringCombination, ScoringEngine, ScoringPart, ScoringTable};
pub use turn::{Selection, Turn, TurnChoice, TurnDecider, TurnOutcome, TurnPhase, TurnState, run_turn};
