//! Game event log.

use serde::Serialize;

/// What kind of game event occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEventKind {
    /// A player began a turn.
    TurnStarted {
        /// The player taking the turn.
        player: String,
        /// The player's total before the turn.
        score: u32,
    },
    /// A player chose to build on the previous player's banked turn.
    CarryAccepted {
        /// The player building on the score.
        player: String,
        /// The inherited at-risk score.
        score: u32,
        /// Free dice inherited with it.
        free_dice: usize,
    },
    /// A turn ended in a Zilch.
    Zilched {
        /// The player who zilched.
        player: String,
        /// Locked points kept despite the Zilch.
        kept: u32,
    },
    /// A player banked.
    Banked {
        /// The player who banked.
        player: String,
        /// Points added to the player's total.
        points: u32,
        /// Free dice left over for the next player.
        free_dice: usize,
    },
    /// A player reached the target and the final round began.
    FinalRoundTriggered {
        /// The player who reached the target.
        player: String,
        /// Their total.
        score: u32,
    },
    /// The game finished.
    GameOver {
        /// The winner.
        winner: String,
        /// The winning total.
        score: u32,
    },
}

impl GameEventKind {
    /// The player the event is about.
    pub fn player(&self) -> &str {
        match self {
            Self::TurnStarted { player, .. }
            | Self::CarryAccepted { player, .. }
            | Self::Zilched { player, .. }
            | Self::Banked { player, .. }
            | Self::FinalRoundTriggered { player, .. } => player,
            Self::GameOver { winner, .. } => winner,
        }
    }
}

impl std::fmt::Display for GameEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TurnStarted { player, score } => {
                write!(f, "{player}'s turn (score {score})")
            }
            Self::CarryAccepted {
                player,
                score,
                free_dice,
            } => write!(
                f,
                "{player} builds on {score} points with {free_dice} free dice"
            ),
            Self::Zilched { player, kept } if *kept > 0 => {
                write!(f, "{player} zilched, keeping {kept} locked points")
            }
            Self::Zilched { player, .. } => write!(f, "{player} zilched"),
            Self::Banked {
                player,
                points,
                free_dice,
            } => write!(
                f,
                "{player} banked {points} points, leaving {free_dice} free dice"
            ),
            Self::FinalRoundTriggered { player, score } => {
                write!(f, "{player} reached {score} points: final round")
            }
            Self::GameOver { winner, score } => {
                write!(f, "{winner} wins with {score} points")
            }
        }
    }
}

/// A record of something that happened during a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameEvent {
    /// The turn number (1-based) during which the event occurred.
    pub turn: u32,
    /// What happened.
    pub kind: GameEventKind,
}

/// Accumulates events during a game.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, turn: u32, kind: GameEventKind) {
        self.events.push(GameEvent { turn, kind });
    }

    /// All recorded events.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Events from the given turn.
    pub fn events_in_turn(&self, turn: u32) -> Vec<&GameEvent> {
        self.events.iter().filter(|e| e.turn == turn).collect()
    }

    /// Events about the given player.
    pub fn events_for_player(&self, player: &str) -> Vec<&GameEvent> {
        self.events
            .iter()
            .filter(|e| e.kind.player() == player)
            .collect()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_query() {
        let mut log = EventLog::new();
        log.push(
            1,
            GameEventKind::TurnStarted {
                player: "Ada".into(),
                score: 0,
            },
        );
        log.push(
            1,
            GameEventKind::Banked {
                player: "Ada".into(),
                points: 350,
                free_dice: 4,
            },
        );
        log.push(
            2,
            GameEventKind::Zilched {
                player: "Bo".into(),
                kept: 0,
            },
        );
        assert_eq!(log.len(), 3);
        assert_eq!(log.events_in_turn(1).len(), 2);
        assert_eq!(log.events_for_player("Bo").len(), 1);
        assert!(!log.is_empty());
    }

    #[test]
    fn display() {
        let kind = GameEventKind::Banked {
            player: "Ada".into(),
            points: 350,
            free_dice: 4,
        };
        assert_eq!(kind.to_string(), "Ada banked 350 points, leaving 4 free dice");

        let kind = GameEventKind::Zilched {
            player: "Bo".into(),
            kept: 0,
        };
        assert_eq!(kind.to_string(), "Bo zilched");

        let kind = GameEventKind::Zilched {
            player: "Bo".into(),
            kept: 1000,
        };
        assert_eq!(kind.to_string(), "Bo zilched, keeping 1000 locked points");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let kind = GameEventKind::GameOver {
            winner: "Ada".into(),
            score: 21000,
        };
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, r#"{"kind":"game_over","winner":"Ada","score":21000}"#);
    }
}
