//! Point values for scoring patterns.

use serde::{Deserialize, Serialize};

/// How groups of four or more of a non-1 face are scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupScoring {
    /// `100 * face * n`: four 2's score 800, five 6's score 3000.
    #[default]
    Multiplicative,
    /// `1000 * (n - 3)`: four of any face score 1000, five score 2000.
    Flat,
}

impl std::fmt::Display for GroupScoring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Multiplicative => write!(f, "multiplicative"),
            Self::Flat => write!(f, "flat"),
        }
    }
}

/// The scoring table applied to dice counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTable {
    /// One of each face, 1 through 6.
    pub straight: u32,
    /// Three 1's. Every further 1 in the same group adds this again.
    pub three_ones: u32,
    /// A single 1.
    pub single_one: u32,
    /// A single 5.
    pub single_five: u32,
    /// Rule for four or more of a face other than 1.
    pub groups: GroupScoring,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self {
            straight: 1500,
            three_ones: 1000,
            single_one: 100,
            single_five: 50,
            groups: GroupScoring::Multiplicative,
        }
    }
}

impl ScoringTable {
    /// Set the rule for four or more of a non-1 face.
    pub fn with_groups(mut self, groups: GroupScoring) -> Self {
        self.groups = groups;
        self
    }

    /// Points for a group of `n` dice showing `face`, or `None` below three.
    pub fn group_points(&self, face: u8, n: u8) -> Option<u32> {
        if n < 3 || !(1..=6).contains(&face) {
            return None;
        }
        let (face, n) = (u32::from(face), u32::from(n));
        let points = match (face, n) {
            (1, n) => self.three_ones.saturating_mul(n - 2),
            (k, 3) => 100 * k,
            (k, n) => match self.groups {
                GroupScoring::Multiplicative => 100 * k * n,
                GroupScoring::Flat => 1000 * (n - 3),
            },
        };
        Some(points)
    }

    /// An upper bound on what a single roll of ten dice can score, or
    /// `None` if it does not fit in a `u32`.
    ///
    /// A roll splits into at most ten parts, none worth more than the
    /// largest single part.
    pub fn max_roll_points(&self) -> Option<u32> {
        let largest_part = [
            self.straight,
            self.three_ones.checked_mul(8)?,
            self.single_one,
            self.single_five,
            100 * 6 * 10,
            1000 * 7,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        largest_part.checked_mul(10)
    }

    /// Points for a lone die, or `None` if that face does not score alone.
    pub fn single_points(&self, face: u8) -> Option<u32> {
        match face {
            1 => Some(self.single_one),
            5 => Some(self.single_five),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let t = ScoringTable::default();
        assert_eq!(t.straight, 1500);
        assert_eq!(t.groups, GroupScoring::Multiplicative);
    }

    #[test]
    fn three_of_a_kind() {
        let t = ScoringTable::default();
        assert_eq!(t.group_points(1, 3), Some(1000));
        assert_eq!(t.group_points(2, 3), Some(200));
        assert_eq!(t.group_points(4, 3), Some(400));
        assert_eq!(t.group_points(6, 3), Some(600));
    }

    #[test]
    fn extra_ones_add_a_thousand_each() {
        let t = ScoringTable::default();
        assert_eq!(t.group_points(1, 4), Some(2000));
        assert_eq!(t.group_points(1, 5), Some(3000));
        assert_eq!(t.group_points(1, 10), Some(8000));
    }

    #[test]
    fn multiplicative_groups() {
        let t = ScoringTable::default();
        assert_eq!(t.group_points(2, 4), Some(800));
        assert_eq!(t.group_points(6, 5), Some(3000));
        assert_eq!(t.group_points(5, 6), Some(3000));
    }

    #[test]
    fn flat_groups() {
        let t = ScoringTable::default().with_groups(GroupScoring::Flat);
        assert_eq!(t.group_points(2, 3), Some(200));
        assert_eq!(t.group_points(2, 4), Some(1000));
        assert_eq!(t.group_points(6, 5), Some(2000));
        // ones are unaffected
        assert_eq!(t.group_points(1, 4), Some(2000));
    }

    #[test]
    fn no_group_below_three() {
        let t = ScoringTable::default();
        assert_eq!(t.group_points(1, 2), None);
        assert_eq!(t.group_points(7, 3), None);
    }

    #[test]
    fn singles() {
        let t = ScoringTable::default();
        assert_eq!(t.single_points(1), Some(100));
        assert_eq!(t.single_points(5), Some(50));
        for face in [2, 3, 4, 6] {
            assert_eq!(t.single_points(face), None);
        }
    }

    #[test]
    fn max_roll_points_bounds_ten_dice() {
        let t = ScoringTable::default();
        assert_eq!(t.max_roll_points(), Some(80_000));

        let t: ScoringTable = serde_json::from_str(r#"{"three_ones": 3000000000}"#).unwrap();
        assert_eq!(t.max_roll_points(), None);
        // eight extra ones saturate instead of overflowing
        assert_eq!(t.group_points(1, 10), Some(u32::MAX));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let t: ScoringTable = serde_json::from_str(r#"{"groups":"flat"}"#).unwrap();
        assert_eq!(t.groups, GroupScoring::Flat);
        assert_eq!(t.straight, 1500);
    }
}
