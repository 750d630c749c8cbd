//! Dice multisets and rolling.
//!
//! A roll is an unordered multiset of six-sided die faces, stored as one
//! count per face. Every scoring operation works on counts, so two rolls
//! showing the same faces in a different order are the same value.

pub mod roll;

pub use roll::{DiceRoller, RandomRoller, ScriptedRoller};

use serde::{Deserialize, Serialize};

use crate::error::{ZilchError, ZilchResult};

/// Number of faces on a die.
pub const FACES: u8 = 6;

/// Number of dice in a full roll.
pub const MAX_DICE: usize = 10;

/// An unordered collection of die faces (1-6), at most [`MAX_DICE`] dice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct DiceSet {
    counts: [u8; FACES as usize],
}

impl DiceSet {
    /// Create an empty multiset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a multiset from raw face values.
    pub fn from_faces(faces: &[u8]) -> ZilchResult<Self> {
        if faces.len() > MAX_DICE {
            return Err(ZilchError::InvalidDiceCount(faces.len()));
        }
        let mut set = Self::new();
        for &face in faces {
            if !(1..=FACES).contains(&face) {
                return Err(ZilchError::InvalidFace(face));
            }
            set.counts[usize::from(face - 1)] += 1;
        }
        Ok(set)
    }

    /// `n` dice all showing `face`. Out-of-range faces give an empty set.
    pub fn of_a_kind(face: u8, n: u8) -> Self {
        let mut set = Self::new();
        if (1..=FACES).contains(&face) {
            set.counts[usize::from(face - 1)] = n;
        }
        set
    }

    /// One die of each face: the straight.
    pub fn straight() -> Self {
        Self {
            counts: [1; FACES as usize],
        }
    }

    /// How many dice show `face`.
    pub fn count(&self, face: u8) -> u8 {
        match face {
            1..=FACES => self.counts[usize::from(face - 1)],
            _ => 0,
        }
    }

    /// Total number of dice.
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| usize::from(c)).sum()
    }

    /// Returns true if there are no dice.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Returns true if every face appears at least once.
    pub fn has_straight(&self) -> bool {
        self.counts.iter().all(|&c| c >= 1)
    }

    /// The faces in ascending order.
    pub fn faces(&self) -> Vec<u8> {
        (1..=FACES)
            .flat_map(|face| std::iter::repeat_n(face, usize::from(self.count(face))))
            .collect()
    }

    /// The highest face, or `None` if empty.
    pub fn highest(&self) -> Option<u8> {
        (1..=FACES).rev().find(|&face| self.count(face) > 0)
    }

    /// The dice left after removing `other`, or `None` if `other` is not
    /// contained in this set.
    pub fn difference(&self, other: &DiceSet) -> Option<DiceSet> {
        let mut counts = self.counts;
        for (slot, &theirs) in counts.iter_mut().zip(other.counts.iter()) {
            *slot = slot.checked_sub(theirs)?;
        }
        Some(Self { counts })
    }

    /// Both multisets combined.
    pub fn union(&self, other: &DiceSet) -> DiceSet {
        let mut counts = self.counts;
        for (slot, &theirs) in counts.iter_mut().zip(other.counts.iter()) {
            *slot += theirs;
        }
        Self { counts }
    }
}

impl From<DiceSet> for Vec<u8> {
    fn from(set: DiceSet) -> Self {
        set.faces()
    }
}

impl TryFrom<Vec<u8>> for DiceSet {
    type Error = ZilchError;

    fn try_from(faces: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_faces(&faces)
    }
}

impl std::fmt::Display for DiceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.faces().iter().map(|v| v.to_string()).collect();
        write!(f, "[{}]", values.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dice(faces: &[u8]) -> DiceSet {
        DiceSet::from_faces(faces).unwrap()
    }

    #[test]
    fn from_faces_counts() {
        let d = dice(&[5, 1, 1, 3]);
        assert_eq!(d.count(1), 2);
        assert_eq!(d.count(3), 1);
        assert_eq!(d.count(5), 1);
        assert_eq!(d.count(6), 0);
        assert_eq!(d.len(), 4);
        assert_eq!(d.faces(), vec![1, 1, 3, 5]);
    }

    #[test]
    fn order_does_not_matter() {
        assert_eq!(dice(&[6, 2, 2]), dice(&[2, 6, 2]));
    }

    #[test]
    fn rejects_bad_faces() {
        assert_eq!(DiceSet::from_faces(&[0]), Err(ZilchError::InvalidFace(0)));
        assert_eq!(DiceSet::from_faces(&[7]), Err(ZilchError::InvalidFace(7)));
    }

    #[test]
    fn rejects_too_many_dice() {
        assert_eq!(
            DiceSet::from_faces(&[1; 11]),
            Err(ZilchError::InvalidDiceCount(11))
        );
    }

    #[test]
    fn empty_set() {
        let d = DiceSet::new();
        assert!(d.is_empty());
        assert_eq!(d.len(), 0);
        assert_eq!(d.highest(), None);
        assert_eq!(d.to_string(), "[]");
    }

    #[test]
    fn straight_detection() {
        assert!(dice(&[1, 2, 3, 4, 5, 6]).has_straight());
        assert!(dice(&[6, 5, 4, 3, 2, 1, 1, 5]).has_straight());
        assert!(!dice(&[1, 2, 3, 4, 5, 5]).has_straight());
        assert_eq!(DiceSet::straight(), dice(&[1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn of_a_kind() {
        assert_eq!(DiceSet::of_a_kind(4, 3), dice(&[4, 4, 4]));
        assert!(DiceSet::of_a_kind(9, 3).is_empty());
    }

    #[test]
    fn difference_and_union() {
        let all = dice(&[1, 1, 1, 5, 2]);
        let used = dice(&[1, 1, 1]);
        let rest = all.difference(&used).unwrap();
        assert_eq!(rest, dice(&[2, 5]));
        assert_eq!(rest.union(&used), all);
        assert_eq!(used.difference(&all), None);
    }

    #[test]
    fn highest_face() {
        assert_eq!(dice(&[2, 4, 3]).highest(), Some(4));
    }

    #[test]
    fn display() {
        assert_eq!(dice(&[3, 1, 5]).to_string(), "[1, 3, 5]");
    }

    #[test]
    fn serde_as_face_list() {
        let json = serde_json::to_string(&dice(&[5, 1, 5])).unwrap();
        assert_eq!(json, "[1,5,5]");
        let back: DiceSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dice(&[1, 5, 5]));
        assert!(serde_json::from_str::<DiceSet>("[0]").is_err());
    }
}
