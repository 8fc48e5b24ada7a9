//! Serializable match snapshots.
//!
//! A snapshot captures the board and match flow between commands for
//! replay tooling and debugging. Sequences in flight are reduced to the
//! seed count they hold.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Board, GameRngState, Generation, MatchConfig, MoveRecord};

use super::phase::Phase;

/// Point-in-time copy of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub generation: Generation,
    pub config: MatchConfig,
    pub board: Board,
    pub phase: Phase,
    /// Seeds held by in-flight sequences of this match.
    pub seeds_in_hand: u32,
    pub history: Vector<MoveRecord>,
    pub rng: GameRngState,
    /// RNG of a running jittered race; restore with `Jittered::from_state`
    /// to replay the rest of the interleaving.
    pub race_rng: Option<GameRngState>,
}

impl MatchSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    /// Decode a snapshot produced by [`MatchSnapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }

    /// Seeds accounted for by the board plus in-flight hands.
    #[must_use]
    pub fn seed_total(&self) -> u32 {
        self.board.total() + self.seeds_in_hand
    }
}
