//! Dice rollers.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{DiceSet, FACES, MAX_DICE};
use crate::error::{ZilchError, ZilchResult};

/// A source of dice rolls.
pub trait DiceRoller {
    /// Roll `count` six-sided dice.
    fn roll(&mut self, count: usize) -> ZilchResult<DiceSet>;
}

fn check_count(count: usize) -> ZilchResult<()> {
    if count == 0 || count > MAX_DICE {
        return Err(ZilchError::InvalidDiceCount(count));
    }
    Ok(())
}

/// Rolls dice with a uniform random source.
#[derive(Debug, Clone)]
pub struct RandomRoller {
    rng: StdRng,
}

impl RandomRoller {
    /// A roller with a fixed seed, for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A roller seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl DiceRoller for RandomRoller {
    fn roll(&mut self, count: usize) -> ZilchResult<DiceSet> {
        check_count(count)?;
        let faces: Vec<u8> = (0..count)
            .map(|_| self.rng.random_range(1..=FACES))
            .collect();
        DiceSet::from_faces(&faces)
    }
}

/// Replays a fixed sequence of rolls.
///
/// Each call to [`DiceRoller::roll`] consumes the next scripted roll, which
/// must contain exactly the requested number of dice.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    rolls: VecDeque<DiceSet>,
}

impl ScriptedRoller {
    /// Build a script from raw face lists.
    pub fn new(rolls: &[&[u8]]) -> ZilchResult<Self> {
        let rolls = rolls
            .iter()
            .map(|faces| DiceSet::from_faces(faces))
            .collect::<ZilchResult<VecDeque<_>>>()?;
        Ok(Self { rolls })
    }

    /// Number of rolls left in the script.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl DiceRoller for ScriptedRoller {
    fn roll(&mut self, count: usize) -> ZilchResult<DiceSet> {
        check_count(count)?;
        let next = self.rolls.pop_front().ok_or(ZilchError::ScriptExhausted)?;
        if next.len() != count {
            return Err(ZilchError::ScriptMismatch {
                expected: count,
                actual: next.len(),
            });
        }
        Ok(next)
    }
}
