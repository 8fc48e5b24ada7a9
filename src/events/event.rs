//! Game event types.

use serde::{Deserialize, Serialize};

use crate::core::{Generation, Player};
use crate::race::RaceReason;
use crate::rules::GameResult;

/// Something that happened on the board or in the match flow.
///
/// Events are produced only by the engine; observers never feed them back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh board was laid out for a new match.
    MatchStarted { generation: Generation },

    /// A player picked their race starting hole during setup.
    StartChosen { player: Player, hole: usize },

    /// Both starting holes are known and the race sequences began.
    RaceStarted { start_a: usize, start_b: usize },

    /// A player lifted every seed out of `slot` into their hand.
    SeedPickedUp {
        player: Player,
        slot: usize,
        count: u32,
    },

    /// One seed moved from the previous position into `to`.
    SeedLanded {
        player: Player,
        from: usize,
        to: usize,
    },

    /// A capture moved `count` seeds from `opposite`, plus the landing seed,
    /// into the player's store.
    Captured {
        player: Player,
        landing: usize,
        opposite: usize,
        count: u32,
    },

    /// The last seed of a turn-phase sequence landed in the mover's store.
    ExtraTurn { player: Player },

    /// The last seed of a race sequence landed in the mover's store.
    RaceFinished { player: Player },

    /// A sequence ended in a hole (with or without a capture).
    Stopped { player: Player, slot: usize },

    /// The race is over and `first` moves first.
    RaceResolved { first: Player, reason: RaceReason },

    /// `player` is now the one to move.
    TurnChanged { player: Player },

    /// `player` had no seeds on their side and lost the move.
    TurnSkipped { player: Player },

    /// The match is over.
    GameEnded {
        score_a: u32,
        score_b: u32,
        result: GameResult,
    },
}

impl GameEvent {
    /// The player this event is about, if any.
    #[must_use]
    pub fn player(&self) -> Option<Player> {
        match self {
            GameEvent::StartChosen { player, .. }
            | GameEvent::SeedPickedUp { player, .. }
            | GameEvent::SeedLanded { player, .. }
            | GameEvent::Captured { player, .. }
            | GameEvent::ExtraTurn { player }
            | GameEvent::RaceFinished { player }
            | GameEvent::Stopped { player, .. }
            | GameEvent::TurnChanged { player }
            | GameEvent::TurnSkipped { player } => Some(*player),
            GameEvent::RaceResolved { first, .. } => Some(*first),
            GameEvent::MatchStarted { .. }
            | GameEvent::RaceStarted { .. }
            | GameEvent::GameEnded { .. } => None,
        }
    }

    /// True for the events that close a sowing sequence.
    #[must_use]
    pub fn is_sequence_terminal(&self) -> bool {
        matches!(
            self,
            GameEvent::ExtraTurn { .. } | GameEvent::RaceFinished { .. } | GameEvent::Stopped { .. }
        )
    }
}
