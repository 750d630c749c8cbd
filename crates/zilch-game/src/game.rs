//! The game loop: seats, permanent scores, carry-over and the final round.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::info;

use zilch_engine::{
    DiceRoller, PlayerOrder, ScoringEngine, TurnDecider, TurnOutcome, TurnState, ZilchError,
    ZilchResult, order, run_turn,
};

use crate::config::{FinalRound, GameConfig};
use crate::error::{GameError, GameResult};
use crate::event::{EventLog, GameEventKind};

/// A banked turn the next player may build on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Carry {
    /// The banked score, still at risk for whoever builds on it.
    pub score: u32,
    /// Free dice left by the banking player.
    pub free_dice: usize,
}

/// Decisions a player makes across a game.
pub trait PlayerDecider: TurnDecider {
    /// Whether to build on the previous player's banked turn instead of
    /// rolling all ten dice from zero.
    fn build_on(&mut self, player: &str, carry: &Carry) -> ZilchResult<bool>;
}

/// A player's total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// The player.
    pub player: String,
    /// Their total score.
    pub score: u32,
}

/// What happened in one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// The player who took the turn.
    pub player: String,
    /// The state the turn started from.
    pub start: TurnState,
    /// How the turn ended.
    pub outcome: TurnOutcome,
    /// The player's total after the turn.
    pub total: u32,
    /// True if this turn reached the target and started the final round.
    pub final_round_triggered: bool,
    /// True if the game ended with this turn.
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stage {
    Regular,
    /// Seats that have had their turn since the target was reached.
    EveryoneOnce { played: Vec<bool> },
    /// Seats still owed a fresh final turn.
    Trailing { queue: VecDeque<usize> },
    Finished,
}

/// A game of Zilch in progress.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    engine: ScoringEngine,
    scores: Vec<(String, u32)>,
    seat: usize,
    carry: Option<Carry>,
    stage: Stage,
    turns: u32,
    log: EventLog,
}

impl Game {
    /// Start a game with players already in playing order.
    pub fn new(order: Vec<String>, config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        check_names(&order)?;

        let engine = ScoringEngine::new(config.scoring.clone());
        Ok(Self {
            config,
            engine,
            scores: order.into_iter().map(|name| (name, 0)).collect(),
            seat: 0,
            carry: None,
            stage: Stage::Regular,
            turns: 0,
            log: EventLog::new(),
        })
    }

    /// Start a game, rolling off to decide who plays first.
    ///
    /// Returns the resolved order alongside the game so callers can show
    /// the roll-offs.
    pub fn with_rolled_order<R>(
        names: Vec<String>,
        config: GameConfig,
        roller: &mut R,
    ) -> GameResult<(Self, PlayerOrder<String>)>
    where
        R: DiceRoller + ?Sized,
    {
        config.validate()?;
        check_names(&names)?;

        let mode = config.order_mode_for(names.len());
        let resolved = order::resolve(&names, mode, roller)?;
        let game = Self::new(resolved.clone().into_players(), config)?;
        Ok((game, resolved))
    }

    /// The configuration in use.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The scoring engine in use.
    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Players and totals in seat order.
    pub fn scores(&self) -> impl Iterator<Item = (&str, u32)> {
        self.scores.iter().map(|(name, score)| (name.as_str(), *score))
    }

    /// A player's total, if they are in the game.
    pub fn score_of(&self, player: &str) -> Option<u32> {
        self.scores
            .iter()
            .find(|(name, _)| name == player)
            .map(|&(_, score)| score)
    }

    /// The player whose turn is next, or `None` once the game is over.
    pub fn current_player(&self) -> Option<&str> {
        if self.is_finished() {
            return None;
        }
        self.scores.get(self.seat).map(|(name, _)| name.as_str())
    }

    /// The banked turn the next player may build on.
    pub fn carry(&self) -> Option<&Carry> {
        self.carry.as_ref()
    }

    /// Returns true once the final round has begun.
    pub fn in_final_round(&self) -> bool {
        !matches!(self.stage, Stage::Regular)
    }

    /// Returns true once the game is over.
    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Finished
    }

    /// Number of turns played.
    pub fn turns_played(&self) -> u32 {
        self.turns
    }

    /// Everything that has happened so far.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Totals sorted high to low; equal totals keep seat order.
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .scores
            .iter()
            .map(|(player, score)| Standing {
                player: player.clone(),
                score: *score,
            })
            .collect();
        standings.sort_by(|a, b| b.score.cmp(&a.score));
        standings
    }

    /// The leading player. Ties go to the earliest seat.
    pub fn winner(&self) -> Option<Standing> {
        self.standings().into_iter().next()
    }

    /// Play the next player's turn.
    pub fn play_turn<R, D>(&mut self, roller: &mut R, decider: &mut D) -> GameResult<TurnReport>
    where
        R: DiceRoller + ?Sized,
        D: PlayerDecider + ?Sized,
    {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        let seat = self.seat;
        let (player, before) = self
            .scores
            .get(seat)
            .cloned()
            .ok_or(GameError::Engine(ZilchError::NoPlayers))?;

        self.turns += 1;
        self.log.push(
            self.turns,
            GameEventKind::TurnStarted {
                player: player.clone(),
                score: before,
            },
        );

        let offer = self
            .carry
            .take()
            .filter(|_| self.config.carry_over && !matches!(self.stage, Stage::Trailing { .. }));
        let mut start = TurnState::fresh();
        if let Some(carry) = offer
            && decider.build_on(&player, &carry)?
        {
            start = TurnState::inherit(carry.score, carry.free_dice)?;
            self.log.push(
                self.turns,
                GameEventKind::CarryAccepted {
                    player: player.clone(),
                    score: carry.score,
                    free_dice: carry.free_dice,
                },
            );
        }

        let outcome = run_turn(&self.engine, &player, start, roller, decider)?;
        let total = before.saturating_add(outcome.score);
        self.scores[seat].1 = total;

        if outcome.zilched {
            info!(player = %player, kept = outcome.score, total, "zilched");
            self.log.push(
                self.turns,
                GameEventKind::Zilched {
                    player: player.clone(),
                    kept: outcome.score,
                },
            );
            self.carry = None;
        } else {
            info!(player = %player, points = outcome.score, total, "banked");
            self.log.push(
                self.turns,
                GameEventKind::Banked {
                    player: player.clone(),
                    points: outcome.score,
                    free_dice: outcome.free_dice,
                },
            );
            self.carry = (outcome.score > 0).then_some(Carry {
                score: outcome.score,
                free_dice: outcome.free_dice,
            });
        }

        let triggered = self.stage == Stage::Regular && total >= self.config.target_score;
        if triggered {
            info!(player = %player, total, "final round");
            self.log.push(
                self.turns,
                GameEventKind::FinalRoundTriggered {
                    player: player.clone(),
                    score: total,
                },
            );
            self.stage = match self.config.final_round {
                FinalRound::EveryoneOnce => Stage::EveryoneOnce {
                    played: vec![false; self.scores.len()],
                },
                FinalRound::TrailingPlayers => Stage::Trailing {
                    queue: self
                        .scores
                        .iter()
                        .enumerate()
                        .filter(|(_, (_, score))| *score < self.config.target_score)
                        .map(|(i, _)| i)
                        .collect(),
                },
            };
        }
        self.advance(seat);

        if self.is_finished()
            && let Some(winner) = self.winner()
        {
            info!(winner = %winner.player, score = winner.score, "game over");
            self.log.push(
                self.turns,
                GameEventKind::GameOver {
                    winner: winner.player,
                    score: winner.score,
                },
            );
        }

        Ok(TurnReport {
            player,
            start,
            outcome,
            total,
            final_round_triggered: triggered,
            game_over: self.is_finished(),
        })
    }

    /// Play turns until the game ends; returns the final standings.
    pub fn play<R, D>(&mut self, roller: &mut R, decider: &mut D) -> GameResult<Vec<Standing>>
    where
        R: DiceRoller + ?Sized,
        D: PlayerDecider + ?Sized,
    {
        while !self.is_finished() {
            self.play_turn(roller, decider)?;
        }
        Ok(self.standings())
    }

    /// Move to the next seat after `seat` has played.
    fn advance(&mut self, seat: usize) {
        let seats = self.scores.len();
        match &mut self.stage {
            Stage::Regular => self.seat = (seat + 1) % seats,
            Stage::EveryoneOnce { played } => {
                played[seat] = true;
                if played.iter().all(|&p| p) {
                    self.stage = Stage::Finished;
                } else {
                    self.seat = (seat + 1) % seats;
                }
            }
            Stage::Trailing { queue } => match queue.pop_front() {
                Some(next) => {
                    self.seat = next;
                    self.carry = None;
                }
                None => self.stage = Stage::Finished,
            },
            Stage::Finished => {}
        }
    }
}

fn check_names(names: &[String]) -> GameResult<()> {
    if names.is_empty() {
        return Err(ZilchError::NoPlayers.into());
    }
    for (i, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(GameError::EmptyName);
        }
        if names[..i].contains(name) {
            return Err(ZilchError::DuplicatePlayer(name.clone()).into());
        }
    }
    Ok(())
}
