//! Match phases and results.

use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerMap};

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Player),
    /// Equal stores.
    Draw,
}

impl GameResult {
    /// Decide the result from final store counts.
    #[must_use]
    pub fn from_scores(scores: &PlayerMap<u32>) -> Self {
        let (a, b) = (scores[Player::A], scores[Player::B]);
        match a.cmp(&b) {
            std::cmp::Ordering::Greater => GameResult::Winner(Player::A),
            std::cmp::Ordering::Less => GameResult::Winner(Player::B),
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Where the match is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for starting holes. A chooses first, then B.
    Setup {
        start_a: Option<usize>,
        start_b: Option<usize>,
    },
    /// Both race sequences are running.
    Race,
    /// `player` is to move (or their sequence is in flight).
    Turn { player: Player },
    /// Final scores are settled.
    Ended {
        scores: PlayerMap<u32>,
        result: GameResult,
    },
}

impl Phase {
    /// A fresh setup phase with no choices made.
    #[must_use]
    pub const fn setup() -> Self {
        Phase::Setup {
            start_a: None,
            start_b: None,
        }
    }

    /// Short lowercase name for error messages and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Phase::Setup { .. } => "setup",
            Phase::Race => "race",
            Phase::Turn { .. } => "turn",
            Phase::Ended { .. } => "ended",
        }
    }

    /// The player to move, during the turn phase.
    #[must_use]
    pub const fn current_player(&self) -> Option<Player> {
        match self {
            Phase::Turn { player } => Some(*player),
            _ => None,
        }
    }

    /// Check if the match is over.
    #[must_use]
    pub const fn is_ended(&self) -> bool {
        matches!(self, Phase::Ended { .. })
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::setup()
    }
}
