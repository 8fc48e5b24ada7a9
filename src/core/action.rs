//! Move records for match history.
//!
//! Every accepted hole choice is recorded, race starts and turn moves
//! alike. The outcome is filled in once the sequence it started finishes.

use serde::{Deserialize, Serialize};

use super::lifecycle::Generation;
use super::player::Player;
use crate::sowing::SowingOutcome;

/// Which command produced a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// A starting hole chosen during setup.
    RaceStart,
    /// A hole selected on a turn.
    Turn,
}

/// A recorded move with context.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Who chose the hole.
    pub player: Player,
    /// The chosen hole.
    pub hole: usize,
    /// Race start or turn move.
    pub kind: MoveKind,
    /// Match the move belongs to.
    pub generation: Generation,
    /// Position in the match's move list, starting at 0.
    pub sequence: u32,
    /// How the resulting sequence ended, once it has.
    pub outcome: Option<SowingOutcome>,
}

impl MoveRecord {
    /// Create a record with no outcome yet.
    #[must_use]
    pub fn new(
        player: Player,
        hole: usize,
        kind: MoveKind,
        generation: Generation,
        sequence: u32,
    ) -> Self {
        Self {
            player,
            hole,
            kind,
            generation,
            sequence,
            outcome: None,
        }
    }

    /// Set the outcome (builder style).
    #[must_use]
    pub fn with_outcome(mut self, outcome: SowingOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// True once the sequence this move started has finished.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.outcome.is_some()
    }
}
