//! Scoring-combination enumeration.
//!
//! Given a roll, [`ScoringEngine::enumerate`] lists every way to score it:
//! each scoring pattern on its own, and each pattern followed by any chain
//! of further patterns on the dice it leaves behind. Chains are memoised
//! per distinct multiset of remaining dice and deduplicated by canonical
//! key, so combinations reached through different orders of rule
//! application are listed once.
//!
//! | Pattern | Points (default table) |
//! |---|---|
//! | 1-2-3-4-5-6 | 1500 |
//! | n 1's (n >= 3) | 1000 * (n - 2) |
//! | three k's (k != 1) | 100 * k |
//! | n k's (n >= 4, k != 1) | see [`GroupScoring`] |
//! | single 1 / single 5 | 100 / 50 |

pub mod table;

pub use table::{GroupScoring, ScoringTable};

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dice::{DiceSet, FACES};

/// One scoring pattern applied to part of a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringPart {
    /// One of each face.
    Straight {
        /// Points scored.
        points: u32,
    },
    /// Three or more dice of one face.
    Group {
        /// The face shown.
        face: u8,
        /// How many dice are in the group.
        count: u8,
        /// Points scored.
        points: u32,
    },
    /// A lone 1 or 5.
    Single {
        /// The face shown.
        face: u8,
        /// Points scored.
        points: u32,
    },
}

impl ScoringPart {
    /// Points this part scores.
    pub fn points(&self) -> u32 {
        match *self {
            Self::Straight { points }
            | Self::Group { points, .. }
            | Self::Single { points, .. } => points,
        }
    }

    /// The dice this part consumes.
    pub fn dice(&self) -> DiceSet {
        match *self {
            Self::Straight { .. } => DiceSet::straight(),
            Self::Group { face, count, .. } => DiceSet::of_a_kind(face, count),
            Self::Single { face, .. } => DiceSet::of_a_kind(face, 1),
        }
    }
}

impl std::fmt::Display for ScoringPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Straight { points } => write!(f, "1-6 ({points})"),
            Self::Group {
                face,
                count,
                points,
            } => write!(f, "{count} {face}'s ({points})"),
            Self::Single { face, points } => write!(f, "{face} ({points})"),
        }
    }
}

/// Identity of a combination: points, sorted parts, used dice, remaining dice.
pub type CanonicalKey = (u32, Vec<ScoringPart>, DiceSet, DiceSet);

/// One way to score a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringCombination {
    /// Total points of all parts.
    pub points: u32,
    /// The parts, in the order they were applied.
    pub parts: Vec<ScoringPart>,
    /// Dice consumed by the parts.
    pub used: DiceSet,
    /// Dice left unscored; these are rolled again if the player continues.
    pub remaining: DiceSet,
}

impl ScoringCombination {
    /// Number of dice left to roll after taking this combination.
    pub fn free_dice(&self) -> usize {
        self.remaining.len()
    }

    /// Returns true if this combination scores every die.
    pub fn is_hot_dice(&self) -> bool {
        self.remaining.is_empty()
    }

    /// The parts rendered as a comma-separated label list.
    pub fn description(&self) -> String {
        let labels: Vec<String> = self.parts.iter().map(|p| p.to_string()).collect();
        labels.join(", ")
    }

    /// The key under which two derivations count as the same combination.
    pub fn canonical_key(&self) -> CanonicalKey {
        let mut parts = self.parts.clone();
        parts.sort();
        (self.points, parts, self.used, self.remaining)
    }
}

impl std::fmt::Display for ScoringCombination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Score {} pts, Scoring dice: [{}], Free dice: {}",
            self.points,
            self.description(),
            self.free_dice()
        )
    }
}

/// Enumerates scoring combinations under a [`ScoringTable`].
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    table: ScoringTable,
}

impl ScoringEngine {
    /// Create an engine with the given scoring table.
    pub fn new(table: ScoringTable) -> Self {
        Self { table }
    }

    /// The point values in use.
    pub fn table(&self) -> &ScoringTable {
        &self.table
    }

    /// Every distinct scoring combination of `dice`, highest points first.
    ///
    /// An empty result is a Zilch. Combinations with equal points keep the
    /// order in which the search produced them.
    pub fn enumerate(&self, dice: &DiceSet) -> Vec<ScoringCombination> {
        let mut search = Search {
            table: &self.table,
            memo: HashMap::new(),
        };
        let chains = search.chains(*dice);

        let mut combos: Vec<ScoringCombination> = chains
            .iter()
            .filter_map(|chain| {
                let remaining = dice.difference(&chain.used)?;
                Some(ScoringCombination {
                    points: chain.points,
                    parts: chain.parts.clone(),
                    used: chain.used,
                    remaining,
                })
            })
            .collect();
        combos.sort_by(|a, b| b.points.cmp(&a.points));

        debug!(
            dice = %dice,
            combinations = combos.len(),
            states = search.memo.len(),
            "enumerated scoring combinations"
        );
        combos
    }

    /// Returns true if no die or group in `dice` scores.
    pub fn is_zilch(&self, dice: &DiceSet) -> bool {
        primitives(&self.table, dice).is_empty()
    }
}

/// A sequence of parts applied one after another to a multiset.
#[derive(Debug, Clone)]
struct Chain {
    points: u32,
    parts: Vec<ScoringPart>,
    used: DiceSet,
}

impl Chain {
    fn start(part: ScoringPart) -> Self {
        Self {
            points: part.points(),
            parts: vec![part],
            used: part.dice(),
        }
    }

    fn then(&self, tail: &Chain) -> Self {
        let mut parts = self.parts.clone();
        parts.extend_from_slice(&tail.parts);
        Self {
            points: self.points.saturating_add(tail.points),
            parts,
            used: self.used.union(&tail.used),
        }
    }

    // Remaining dice are implied by the multiset the chain was built on.
    fn key(&self) -> (u32, Vec<ScoringPart>, DiceSet) {
        let mut parts = self.parts.clone();
        parts.sort();
        (self.points, parts, self.used)
    }
}

/// Per-call search state.
struct Search<'t> {
    table: &'t ScoringTable,
    memo: HashMap<DiceSet, Rc<[Chain]>>,
}

impl Search<'_> {
    fn chains(&mut self, dice: DiceSet) -> Rc<[Chain]> {
        if let Some(found) = self.memo.get(&dice) {
            return Rc::clone(found);
        }

        let mut chains = Vec::new();
        let mut seen = HashSet::new();
        for part in primitives(self.table, &dice) {
            let Some(rest) = dice.difference(&part.dice()) else {
                continue;
            };
            let head = Chain::start(part);
            if seen.insert(head.key()) {
                chains.push(head.clone());
            }
            for tail in self.chains(rest).iter() {
                let chain = head.then(tail);
                if seen.insert(chain.key()) {
                    chains.push(chain);
                }
            }
        }

        let chains: Rc<[Chain]> = chains.into();
        self.memo.insert(dice, Rc::clone(&chains));
        chains
    }
}

/// Every single pattern that applies directly to `dice`.
fn primitives(table: &ScoringTable, dice: &DiceSet) -> Vec<ScoringPart> {
    let mut parts = Vec::new();

    if dice.has_straight() {
        parts.push(ScoringPart::Straight {
            points: table.straight,
        });
    }

    for face in 1..=FACES {
        for count in 3..=dice.count(face) {
            if let Some(points) = table.group_points(face, count) {
                parts.push(ScoringPart::Group {
                    face,
                    count,
                    points,
                });
            }
        }
    }

    for face in [1, 5] {
        if dice.count(face) > 0
            && let Some(points) = table.single_points(face)
        {
            parts.push(ScoringPart::Single { face, points });
        }
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dice(faces: &[u8]) -> DiceSet {
        DiceSet::from_faces(faces).unwrap()
    }

    #[test]
    fn oversized_table_does_not_overflow() {
        let table: ScoringTable =
            serde_json::from_str(r#"{"three_ones": 3000000000, "single_one": 4000000000}"#)
                .unwrap();
        let combos = ScoringEngine::new(table).enumerate(&dice(&[1, 1, 1, 1]));
        assert_eq!(combos[0].points, u32::MAX);
    }

    fn points(combos: &[ScoringCombination]) -> Vec<u32> {
        combos.iter().map(|c| c.points).collect()
    }

    #[test]
    fn three_ones_score_1000() {
        let combos = ScoringEngine::default().enumerate(&dice(&[1, 1, 1]));
        assert_eq!(combos[0].points, 1000);
        assert_eq!(combos[0].description(), "3 1's (1000)");
        assert!(combos[0].is_hot_dice());
    }

    #[test]
    fn three_fours_score_400() {
        let combos = ScoringEngine::default().enumerate(&dice(&[4, 4, 4]));
        assert_eq!(points(&combos), vec![400]);
    }

    #[test]
    fn four_ones_are_deduplicated() {
        let combos = ScoringEngine::default().enumerate(&dice(&[1, 1, 1, 1]));
        assert_eq!(points(&combos), vec![2000, 1100, 1000, 400, 300, 200, 100]);
    }

    #[test]
    fn four_fives_multiplicative() {
        let combos = ScoringEngine::default().enumerate(&dice(&[5, 5, 5, 5]));
        assert_eq!(combos[0].points, 2000);
        assert_eq!(combos[0].description(), "4 5's (2000)");
    }

    #[test]
    fn four_twos_flat() {
        let engine = ScoringEngine::new(ScoringTable::default().with_groups(GroupScoring::Flat));
        let combos = engine.enumerate(&dice(&[2, 2, 2, 2]));
        assert_eq!(points(&combos), vec![1000, 200]);
    }

    #[test]
    fn mixed_roll_offers_ones_and_optional_fives() {
        let roll = dice(&[1, 1, 1, 5, 5, 2, 3, 4]);
        let combos = ScoringEngine::default().enumerate(&roll);

        let three_ones = ScoringPart::Group {
            face: 1,
            count: 3,
            points: 1000,
        };
        assert!(
            combos
                .iter()
                .any(|c| c.points == 1000 && c.parts == vec![three_ones])
        );
        assert!(combos.iter().any(|c| c.points == 1050
            && c.parts.contains(&three_ones)
            && c.used.count(5) == 1));
        assert!(combos.iter().any(|c| c.points == 1100
            && c.parts.contains(&three_ones)
            && c.used.count(5) == 2));
        assert_eq!(combos[0].points, 1100);
        assert_eq!(combos[0].free_dice(), 3);

        for combo in &combos {
            for face in [2, 3, 4] {
                assert_eq!(combo.used.count(face), 0, "{combo}");
            }
        }
    }

    #[test]
    fn exact_straight() {
        let combos = ScoringEngine::default().enumerate(&dice(&[1, 2, 3, 4, 5, 6]));
        assert_eq!(points(&combos), vec![1500, 150, 100, 50]);
        assert_eq!(combos[0].description(), "1-6 (1500)");
        assert!(combos[0].is_hot_dice());
    }

    #[test]
    fn straight_then_leftovers() {
        let combos = ScoringEngine::default().enumerate(&dice(&[1, 2, 3, 4, 5, 6, 1, 5]));
        assert_eq!(combos[0].points, 1650);
        assert!(combos[0].is_hot_dice());
        assert!(combos.iter().any(|c| c.points == 1600));
        assert!(combos.iter().any(|c| c.points == 1550));
    }

    #[test]
    fn no_scoring_dice_is_zilch() {
        let engine = ScoringEngine::default();
        let roll = dice(&[2, 3, 4, 6, 6, 2]);
        assert!(engine.enumerate(&roll).is_empty());
        assert!(engine.is_zilch(&roll));
        assert!(!engine.is_zilch(&dice(&[2, 5])));
    }

    #[test]
    fn combination_display() {
        let combos = ScoringEngine::default().enumerate(&dice(&[1, 5, 3]));
        assert_eq!(
            combos[0].to_string(),
            "Score 150 pts, Scoring dice: [1 (100), 5 (50)], Free dice: 1"
        );
    }

    fn any_roll() -> impl Strategy<Value = DiceSet> {
        prop::collection::vec(1u8..=6, 1..=10).prop_map(|faces| dice(&faces))
    }

    proptest! {
        #[test]
        fn used_and_remaining_rebuild_the_roll(roll in any_roll()) {
            for combo in ScoringEngine::default().enumerate(&roll) {
                prop_assert_eq!(combo.used.union(&combo.remaining), roll);
                prop_assert_eq!(combo.points, combo.parts.iter().map(|p| p.points()).sum::<u32>());
                prop_assert!(combo.points > 0);
            }
        }

        #[test]
        fn canonical_keys_are_unique(roll in any_roll()) {
            let combos = ScoringEngine::default().enumerate(&roll);
            let keys: HashSet<_> = combos.iter().map(|c| c.canonical_key()).collect();
            prop_assert_eq!(keys.len(), combos.len());
        }

        #[test]
        fn sorted_by_points_descending(roll in any_roll()) {
            let combos = ScoringEngine::default().enumerate(&roll);
            prop_assert!(combos.windows(2).all(|w| w[0].points >= w[1].points));
        }

        #[test]
        fn straight_listed_exactly_once(extra in prop::collection::vec(1u8..=6, 0..=4)) {
            let mut faces = vec![1, 2, 3, 4, 5, 6];
            faces.extend(extra);
            let combos = ScoringEngine::default().enumerate(&dice(&faces));
            let straight_only: Vec<_> = combos
                .iter()
                .filter(|c| c.parts == vec![ScoringPart::Straight { points: 1500 }])
                .collect();
            prop_assert_eq!(straight_only.len(), 1);
            prop_assert_eq!(straight_only[0].used, DiceSet::straight());
        }

        #[test]
        fn no_ones_fives_or_triples_is_zilch(counts in prop::array::uniform4(0u8..=2)) {
            let faces: Vec<u8> = [2u8, 3, 4, 6]
                .iter()
                .zip(counts.iter())
                .flat_map(|(&face, &n)| std::iter::repeat_n(face, usize::from(n)))
                .collect();
            prop_assume!(!faces.is_empty());
            prop_assert!(ScoringEngine::default().enumerate(&dice(&faces)).is_empty());
        }
    }
}
