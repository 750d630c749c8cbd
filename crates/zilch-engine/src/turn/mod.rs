//! Turn state machine.
//!
//! A turn alternates between rolling the free dice and choosing how to
//! score them. Scoring every die ("hot dice") locks the points earned so
//! far and hands back all ten dice; a roll with nothing to score (a Zilch)
//! ends the turn and forfeits everything not locked.
//!
//! ```text
//! Rolling -> Selecting -> Deciding -> Rolling | Banked
//!    |           \-> Rolling (hot dice)
//!    \-> Zilched
//! ```

pub mod decision;

pub use decision::{TurnChoice, TurnDecider};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dice::{DiceRoller, DiceSet, MAX_DICE};
use crate::error::{ZilchError, ZilchResult};
use crate::scoring::{ScoringCombination, ScoringEngine};

/// Points and dice tracked across the rolls of one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Points secured by hot dice; they survive a later Zilch.
    pub locked_points: u32,
    /// Score taken over from the previous player, until the next hot dice.
    pub inherited_score: u32,
    /// Points at risk: lost entirely on a Zilch.
    pub turn_score: u32,
    /// Dice to roll next.
    pub free_dice: usize,
}

impl TurnState {
    /// A fresh turn: nothing scored, all ten dice.
    pub fn fresh() -> Self {
        Self {
            locked_points: 0,
            inherited_score: 0,
            turn_score: 0,
            free_dice: MAX_DICE,
        }
    }

    /// A turn that builds on the previous player's banked score and free dice.
    pub fn inherit(score: u32, free_dice: usize) -> ZilchResult<Self> {
        if free_dice == 0 || free_dice > MAX_DICE {
            return Err(ZilchError::InvalidDiceCount(free_dice));
        }
        Ok(Self {
            locked_points: 0,
            inherited_score: score,
            turn_score: score,
            free_dice,
        })
    }

    /// Start with points already locked.
    pub fn with_locked_points(mut self, points: u32) -> Self {
        self.locked_points = points;
        self
    }

    /// What banking now would score.
    pub fn bank_value(&self) -> u32 {
        self.locked_points.saturating_add(self.turn_score)
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::fresh()
    }
}

/// How a finished turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Points the turn adds to the player's total.
    pub score: u32,
    /// True if the turn ended in a Zilch.
    pub zilched: bool,
    /// Free dice left for the next player to build on (10 after a Zilch).
    pub free_dice: usize,
}

/// Result of applying a scoring selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Every die scored: points locked, all ten dice must be rolled.
    HotDice {
        /// Locked points after the lock.
        locked_points: u32,
    },
    /// Dice remain; the player decides whether to roll them or bank.
    Scored {
        /// Dice left to roll.
        free_dice: usize,
    },
}

/// Where a turn is in its cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnPhase {
    /// The free dice must be rolled.
    Rolling,
    /// A roll scored; one of these combinations must be chosen.
    Selecting {
        /// Ranked scoring options for the last roll.
        options: Vec<ScoringCombination>,
    },
    /// Dice remain after scoring; roll again or bank.
    Deciding,
    /// The last roll scored nothing. Terminal.
    Zilched,
    /// The player stopped and kept the points. Terminal.
    Banked,
}

impl TurnPhase {
    fn name(&self) -> &'static str {
        match self {
            Self::Rolling => "rolling",
            Self::Selecting { .. } => "selecting",
            Self::Deciding => "deciding",
            Self::Zilched => "zilched",
            Self::Banked => "banked",
        }
    }
}

/// One player's turn.
#[derive(Debug, Clone)]
pub struct Turn<'e> {
    engine: &'e ScoringEngine,
    player: String,
    state: TurnState,
    phase: TurnPhase,
    last_roll: Option<DiceSet>,
    rolls: u32,
}

impl<'e> Turn<'e> {
    /// Begin a turn from the given state.
    pub fn new(engine: &'e ScoringEngine, player: impl Into<String>, start: TurnState) -> Self {
        Self {
            engine,
            player: player.into(),
            state: start,
            phase: TurnPhase::Rolling,
            last_roll: None,
            rolls: 0,
        }
    }

    /// The player taking the turn.
    pub fn player(&self) -> &str {
        &self.player
    }

    /// Current points and dice.
    pub fn state(&self) -> &TurnState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    /// The most recent roll, if any.
    pub fn last_roll(&self) -> Option<&DiceSet> {
        self.last_roll.as_ref()
    }

    /// How many times dice have been rolled this turn.
    pub fn roll_count(&self) -> u32 {
        self.rolls
    }

    /// Scoring options awaiting a selection (empty outside `Selecting`).
    pub fn options(&self) -> &[ScoringCombination] {
        match &self.phase {
            TurnPhase::Selecting { options } => options,
            _ => &[],
        }
    }

    /// Returns true once the turn has zilched or banked.
    pub fn is_over(&self) -> bool {
        matches!(self.phase, TurnPhase::Zilched | TurnPhase::Banked)
    }

    /// The final result, once the turn is over.
    pub fn outcome(&self) -> Option<TurnOutcome> {
        match self.phase {
            TurnPhase::Zilched => Some(TurnOutcome {
                score: self.state.locked_points,
                zilched: true,
                free_dice: MAX_DICE,
            }),
            TurnPhase::Banked => Some(TurnOutcome {
                score: self.state.bank_value(),
                zilched: false,
                free_dice: self.state.free_dice,
            }),
            _ => None,
        }
    }

    /// Roll the free dice and evaluate them.
    ///
    /// Returns the ranked scoring options. An empty slice means the roll
    /// zilched and the turn is over.
    pub fn roll<R>(&mut self, roller: &mut R) -> ZilchResult<&[ScoringCombination]>
    where
        R: DiceRoller + ?Sized,
    {
        self.require(matches!(self.phase, TurnPhase::Rolling), "roll")?;

        let roll = roller.roll(self.state.free_dice)?;
        self.rolls += 1;
        self.last_roll = Some(roll);

        let options = self.engine.enumerate(&roll);
        debug!(
            player = %self.player,
            roll = %roll,
            options = options.len(),
            at_risk = self.state.turn_score,
            "rolled"
        );

        if options.is_empty() {
            debug!(player = %self.player, forfeited = self.state.turn_score, "zilch");
            self.phase = TurnPhase::Zilched;
        } else {
            self.phase = TurnPhase::Selecting { options };
        }
        Ok(self.options())
    }

    /// Apply the scoring option at `index`.
    ///
    /// An index outside the offered options is rejected and the turn stays
    /// in `Selecting`.
    pub fn select(&mut self, index: usize) -> ZilchResult<Selection> {
        self.require(matches!(self.phase, TurnPhase::Selecting { .. }), "select")?;

        let options = self.options();
        let chosen = options
            .get(index)
            .cloned()
            .ok_or(ZilchError::InvalidSelection {
                index,
                available: options.len(),
            })?;

        self.state.turn_score = self.state.turn_score.saturating_add(chosen.points);
        self.state.free_dice = chosen.free_dice();
        debug!(player = %self.player, choice = %chosen, "selected");

        if self.state.free_dice == 0 {
            self.state.locked_points = self
                .state
                .locked_points
                .saturating_add(self.state.turn_score);
            self.state.turn_score = 0;
            self.state.inherited_score = 0;
            self.state.free_dice = MAX_DICE;
            self.phase = TurnPhase::Rolling;
            debug!(player = %self.player, locked = self.state.locked_points, "hot dice");
            Ok(Selection::HotDice {
                locked_points: self.state.locked_points,
            })
        } else {
            self.phase = TurnPhase::Deciding;
            Ok(Selection::Scored {
                free_dice: self.state.free_dice,
            })
        }
    }

    /// Roll the free dice again, keeping the turn score at risk.
    pub fn keep_rolling(&mut self) -> ZilchResult<()> {
        self.require(matches!(self.phase, TurnPhase::Deciding), "keep rolling")?;
        self.phase = TurnPhase::Rolling;
        Ok(())
    }

    /// Stop and keep locked points plus the turn score.
    pub fn bank(&mut self) -> ZilchResult<TurnOutcome> {
        self.require(matches!(self.phase, TurnPhase::Deciding), "bank")?;
        self.phase = TurnPhase::Banked;
        let outcome = TurnOutcome {
            score: self.state.bank_value(),
            zilched: false,
            free_dice: self.state.free_dice,
        };
        debug!(player = %self.player, score = outcome.score, "banked");
        Ok(outcome)
    }

    fn require(&self, allowed: bool, action: &'static str) -> ZilchResult<()> {
        if allowed {
            Ok(())
        } else {
            Err(ZilchError::WrongPhase {
                action,
                phase: self.phase.name(),
            })
        }
    }
}

/// Play a whole turn, asking `decider` for every choice.
///
/// Returns the points to add to the player's total, whether the turn
/// zilched, and the free dice left for the next player.
pub fn run_turn<R, D>(
    engine: &ScoringEngine,
    player: &str,
    start: TurnState,
    roller: &mut R,
    decider: &mut D,
) -> ZilchResult<TurnOutcome>
where
    R: DiceRoller + ?Sized,
    D: TurnDecider + ?Sized,
{
    let mut turn = Turn::new(engine, player, start);
    loop {
        if turn.roll(roller)?.is_empty() {
            break;
        }

        let roll = turn.last_roll().copied().unwrap_or_default();
        let index = decider.select_option(player, turn.state(), &roll, turn.options())?;
        if let Selection::HotDice { .. } = turn.select(index)? {
            continue;
        }

        match decider.continue_or_bank(player, turn.state())? {
            TurnChoice::Roll => turn.keep_rolling()?,
            TurnChoice::Bank => {
                turn.bank()?;
                break;
            }
        }
    }

    debug!(player, rolls = turn.roll_count(), "turn over");
    turn.outcome().ok_or(ZilchError::WrongPhase {
        action: "finish",
        phase: turn.phase.name(),
    })
}
