//! Decisions a player makes during a turn.

use serde::{Deserialize, Serialize};

use crate::dice::DiceSet;
use crate::error::ZilchResult;
use crate::scoring::ScoringCombination;
use crate::turn::TurnState;

/// What to do after scoring with dice left over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnChoice {
    /// Roll the free dice, keeping the turn score at risk.
    Roll,
    /// Stop and keep locked points plus the turn score.
    Bank,
}

/// Supplies a player's decisions to [`run_turn`](crate::turn::run_turn).
///
/// Input validation and re-prompting belong to the implementor. The turn
/// rejects an out-of-range selection with
/// [`ZilchError::InvalidSelection`](crate::error::ZilchError::InvalidSelection)
/// instead of asking again.
pub trait TurnDecider {
    /// Pick one of `options` (ranked, highest points first) by index.
    fn select_option(
        &mut self,
        player: &str,
        state: &TurnState,
        roll: &DiceSet,
        options: &[ScoringCombination],
    ) -> ZilchResult<usize>;

    /// Decide whether to roll the free dice again or bank.
    fn continue_or_bank(&mut self, player: &str, state: &TurnState) -> ZilchResult<TurnChoice>;
}
