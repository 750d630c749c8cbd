//! Playing order, decided by rolling off ties.
//!
//! Everyone starts tied for first. Tied players each roll one die and are
//! re-ranked by roll, highest first; players who roll the same value stay
//! tied and roll again, until no tie remains in scope.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dice::DiceRoller;
use crate::error::{ZilchError, ZilchResult};

/// Which ties are broken by rolling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderMode {
    /// Roll off every tie: the whole order is decided by dice.
    AllTies,
    /// Roll off only for first place; the rest follow seating order.
    #[default]
    FirstPlaceOnly,
}

/// One round of tie-break rolls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollOff<P> {
    /// The rank the rolling players were tied at.
    pub rank: usize,
    /// Each tied player with the face they rolled.
    pub rolls: Vec<(P, u8)>,
}

/// A resolved playing order.
#[derive(Debug, Clone)]
pub struct PlayerOrder<P> {
    entries: Vec<(P, usize)>,
    index: HashMap<P, usize>,
    roll_offs: Vec<RollOff<P>>,
}

impl<P> PlayerOrder<P>
where
    P: Clone + Eq + Hash,
{
    fn new(entries: Vec<(P, usize)>, roll_offs: Vec<RollOff<P>>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (player, _))| (player.clone(), i))
            .collect();
        Self {
            entries,
            index,
            roll_offs,
        }
    }

    /// Players in playing order.
    pub fn players(&self) -> impl Iterator<Item = &P> {
        self.entries.iter().map(|(player, _)| player)
    }

    /// Consume the order, keeping only the players.
    pub fn into_players(self) -> Vec<P> {
        self.entries.into_iter().map(|(player, _)| player).collect()
    }

    /// The rank a player finished the roll-offs with (1 = first).
    pub fn rank_of(&self, player: &P) -> Option<usize> {
        self.index.get(player).map(|&i| self.entries[i].1)
    }

    /// Zero-based seat of a player in the final order.
    pub fn position_of(&self, player: &P) -> Option<usize> {
        self.index.get(player).copied()
    }

    /// Every roll-off, in the order it happened.
    pub fn roll_offs(&self) -> &[RollOff<P>] {
        &self.roll_offs
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no players.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decide the playing order of `players`.
///
/// In [`OrderMode::FirstPlaceOnly`] the player who wins first place leads,
/// followed by the players after them in the given order, wrapping around.
pub fn resolve<P, R>(players: &[P], mode: OrderMode, roller: &mut R) -> ZilchResult<PlayerOrder<P>>
where
    P: Clone + Eq + Hash + Display,
    R: DiceRoller + ?Sized,
{
    if players.is_empty() {
        return Err(ZilchError::NoPlayers);
    }
    let mut seen = HashSet::with_capacity(players.len());
    for player in players {
        if !seen.insert(player) {
            return Err(ZilchError::DuplicatePlayer(player.to_string()));
        }
    }

    let mut ranks = vec![1usize; players.len()];
    let mut roll_offs = Vec::new();

    loop {
        normalize(&mut ranks);
        let Some(rank) = first_tie(&ranks, mode) else {
            break;
        };

        let tied: Vec<usize> = (0..players.len()).filter(|&i| ranks[i] == rank).collect();
        let mut rolls = Vec::with_capacity(tied.len());
        for &i in &tied {
            let face = roller.roll(1)?.highest().unwrap_or(1);
            rolls.push((i, face));
        }
        debug!(rank, players = tied.len(), "roll-off");

        for (i, step) in dense_steps(&rolls) {
            ranks[i] += step;
        }
        roll_offs.push(RollOff {
            rank,
            rolls: rolls
                .iter()
                .map(|&(i, face)| (players[i].clone(), face))
                .collect(),
        });
    }

    let mut entries: Vec<(P, usize)> = players.iter().cloned().zip(ranks).collect();
    match mode {
        OrderMode::AllTies => entries.sort_by_key(|&(_, rank)| rank),
        OrderMode::FirstPlaceOnly => {
            let leader = entries.iter().position(|&(_, rank)| rank == 1).unwrap_or(0);
            entries.rotate_left(leader);
        }
    }
    Ok(PlayerOrder::new(entries, roll_offs))
}

/// Push players down past every tie group ranked ahead of them, so that a
/// tie of `k` players at rank `r` is followed by rank `r + k`.
fn normalize(ranks: &mut [usize]) {
    for rank in 1..=ranks.len() {
        let tied = ranks.iter().filter(|&&r| r == rank).count();
        if tied > 1 {
            for r in ranks.iter_mut().filter(|r| **r > rank) {
                *r += tied - 1;
            }
        }
    }
}

/// The best rank still shared by several players and in scope for `mode`.
fn first_tie(ranks: &[usize], mode: OrderMode) -> Option<usize> {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for &rank in ranks {
        *counts.entry(rank).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|&(rank, count)| count > 1 && (mode == OrderMode::AllTies || rank == 1))
        .map(|(rank, _)| rank)
        .min()
}

/// Rank offsets within a roll-off: highest roll 0, next distinct roll 1, …
fn dense_steps(rolls: &[(usize, u8)]) -> Vec<(usize, usize)> {
    let mut faces: Vec<u8> = rolls.iter().map(|&(_, face)| face).collect();
    faces.sort_unstable_by(|a, b| b.cmp(a));
    faces.dedup();
    rolls
        .iter()
        .map(|&(i, face)| {
            let step = faces.iter().position(|&f| f == face).unwrap_or(0);
            (i, step)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{RandomRoller, ScriptedRoller};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn roller(rolls: &[&[u8]]) -> ScriptedRoller {
        ScriptedRoller::new(rolls).unwrap()
    }

    #[test]
    fn normalize_pushes_past_ties() {
        let mut ranks = vec![1, 1, 2, 2];
        normalize(&mut ranks);
        assert_eq!(ranks, vec![1, 1, 3, 3]);

        let mut ranks = vec![1, 2, 2, 3];
        normalize(&mut ranks);
        assert_eq!(ranks, vec![1, 2, 2, 4]);

        let mut ranks = vec![1, 1, 1];
        normalize(&mut ranks);
        assert_eq!(ranks, vec![1, 1, 1]);
    }

    #[test]
    fn dense_steps_keep_equal_rolls_tied() {
        let steps = dense_steps(&[(0, 3), (1, 6), (2, 3), (3, 1)]);
        assert_eq!(steps, vec![(0, 1), (1, 0), (2, 1), (3, 2)]);
    }

    #[test]
    fn two_players_one_roll_off() {
        let players = names(&["Ada", "Bo"]);
        let mut dice = roller(&[&[2], &[5]]);
        let order = resolve(&players, OrderMode::AllTies, &mut dice).unwrap();
        assert_eq!(order.clone().into_players(), names(&["Bo", "Ada"]));
        assert_eq!(order.roll_offs().len(), 1);
        assert_eq!(order.rank_of(&"Bo".to_string()), Some(1));
        assert_eq!(order.rank_of(&"Ada".to_string()), Some(2));
    }

    #[test]
    fn two_players_tied_roll_again() {
        let players = names(&["Ada", "Bo"]);
        let mut dice = roller(&[&[4], &[4], &[6], &[1]]);
        let order = resolve(&players, OrderMode::FirstPlaceOnly, &mut dice).unwrap();
        assert_eq!(order.roll_offs().len(), 2);
        assert_eq!(order.roll_offs()[0].rolls, vec![("Ada".to_string(), 4), ("Bo".to_string(), 4)]);
        assert_eq!(order.into_players(), names(&["Ada", "Bo"]));
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn all_ties_resolves_every_rank() {
        let players = names(&["Ada", "Bo", "Cy", "Di"]);
        // 6,6,3,3 -> Ada/Bo tie for 1st, Cy/Di tie for 3rd
        // Ada 2, Bo 5 -> Bo 1st, Ada 2nd
        // Cy 4, Di 1 -> Cy 3rd, Di 4th
        let mut dice = roller(&[&[6], &[6], &[3], &[3], &[2], &[5], &[4], &[1]]);
        let order = resolve(&players, OrderMode::AllTies, &mut dice).unwrap();
        assert_eq!(order.clone().into_players(), names(&["Bo", "Ada", "Cy", "Di"]));
        assert_eq!(order.roll_offs().len(), 3);
        assert_eq!(order.roll_offs()[2].rank, 3);
        let ranks: Vec<_> = order.players().map(|p| order.rank_of(p).unwrap()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }

    #[test]
    fn first_place_only_cycles_from_leader() {
        let players = names(&["Ada", "Bo", "Cy", "Di"]);
        // Cy wins outright; the rest are never rolled off
        let mut dice = roller(&[&[2], &[2], &[6], &[2]]);
        let order = resolve(&players, OrderMode::FirstPlaceOnly, &mut dice).unwrap();
        assert_eq!(order.clone().into_players(), names(&["Cy", "Di", "Ada", "Bo"]));
        assert_eq!(order.roll_offs().len(), 1);
        assert_eq!(order.position_of(&"Ada".to_string()), Some(2));
    }

    #[test]
    fn single_player_needs_no_roll() {
        let players = names(&["Ada"]);
        let mut dice = roller(&[]);
        let order = resolve(&players, OrderMode::AllTies, &mut dice).unwrap();
        assert_eq!(order.len(), 1);
        assert!(!order.is_empty());
        assert!(order.roll_offs().is_empty());
        assert_eq!(order.into_players(), names(&["Ada"]));
    }

    #[test]
    fn rejects_empty_and_duplicates() {
        let mut dice = RandomRoller::seeded(1);
        let empty: Vec<String> = Vec::new();
        assert_eq!(
            resolve(&empty, OrderMode::AllTies, &mut dice).unwrap_err(),
            ZilchError::NoPlayers
        );
        assert_eq!(
            resolve(&names(&["Ada", "Ada"]), OrderMode::AllTies, &mut dice).unwrap_err(),
            ZilchError::DuplicatePlayer("Ada".into())
        );
    }

    #[test]
    fn random_order_is_a_permutation() {
        let players = names(&["Ada", "Bo", "Cy", "Di", "Ed"]);
        for seed in 0..50 {
            let mut dice = RandomRoller::seeded(seed);
            let order = resolve(&players, OrderMode::AllTies, &mut dice).unwrap();
            let mut seen = order.clone().into_players();
            seen.sort();
            assert_eq!(seen, players);
            let mut ranks: Vec<_> = order.players().map(|p| order.rank_of(p).unwrap()).collect();
            ranks.sort();
            assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        }
    }

    #[test]
    fn first_place_is_unique() {
        let players = names(&["Ada", "Bo", "Cy"]);
        for seed in 0..50 {
            let mut dice = RandomRoller::seeded(seed);
            let order = resolve(&players, OrderMode::FirstPlaceOnly, &mut dice).unwrap();
            let leaders = order
                .players()
                .filter(|p| order.rank_of(p) == Some(1))
                .count();
            assert_eq!(leaders, 1);
            assert_eq!(order.rank_of(order.players().next().unwrap()), Some(1));
        }
    }
}
