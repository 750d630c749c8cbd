//! Configuration for a game of Zilch.

use std::path::Path;

use serde::{Deserialize, Serialize};

use zilch_engine::{GroupScoring, OrderMode, RandomRoller, ScoringTable};

use crate::error::{GameError, GameResult};

/// How the game ends once someone reaches the target score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalRound {
    /// Play continues in seat order until everyone has taken one turn
    /// since the target was reached (the triggering turn counts).
    #[default]
    EveryoneOnce,
    /// Every player still below the target takes one fresh turn, in seat
    /// order, without building on anyone's score.
    TrailingPlayers,
}

/// Configuration for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed for reproducible dice; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Score that triggers the final round.
    pub target_score: u32,
    /// How the final round is played.
    pub final_round: FinalRound,
    /// Whether a player may build on the previous player's banked turn.
    pub carry_over: bool,
    /// Which ties the opening roll-off breaks (three or more players).
    pub order_mode: OrderMode,
    /// Point values.
    pub scoring: ScoringTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            target_score: 20_000,
            final_round: FinalRound::EveryoneOnce,
            carry_over: true,
            order_mode: OrderMode::FirstPlaceOnly,
            scoring: ScoringTable::default(),
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> GameResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub fn load(path: &Path) -> GameResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check the values make a playable game.
    pub fn validate(&self) -> GameResult<()> {
        if self.target_score == 0 {
            return Err(GameError::InvalidConfig(
                "target score must be positive".to_string(),
            ));
        }
        match self.scoring.max_roll_points() {
            Some(points) if points <= u32::MAX / 2 => Ok(()),
            _ => Err(GameError::InvalidConfig(
                "scoring values are too large".to_string(),
            )),
        }
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the score that triggers the final round.
    pub fn with_target_score(mut self, target: u32) -> Self {
        self.target_score = target;
        self
    }

    /// Set the final-round policy.
    pub fn with_final_round(mut self, final_round: FinalRound) -> Self {
        self.final_round = final_round;
        self
    }

    /// Enable or disable building on the previous player's score.
    pub fn with_carry_over(mut self, carry_over: bool) -> Self {
        self.carry_over = carry_over;
        self
    }

    /// Set which ties the opening roll-off breaks.
    pub fn with_order_mode(mut self, mode: OrderMode) -> Self {
        self.order_mode = mode;
        self
    }

    /// Set the rule for four or more of a non-1 face.
    pub fn with_group_scoring(mut self, groups: GroupScoring) -> Self {
        self.scoring.groups = groups;
        self
    }

    /// A dice roller seeded from `seed`, or from the OS if unset.
    pub fn roller(&self) -> RandomRoller {
        match self.seed {
            Some(seed) => RandomRoller::seeded(seed),
            None => RandomRoller::from_entropy(),
        }
    }

    /// The order mode actually used for `players` players. Fewer than
    /// three players only ever roll for first place.
    pub fn order_mode_for(&self, players: usize) -> OrderMode {
        if players < 3 {
            OrderMode::FirstPlaceOnly
        } else {
            self.order_mode
        }
    }
}
