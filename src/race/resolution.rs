//! Deciding who moves first after the race.
//!
//! Store gain counts every seed a race sequence put into its own store:
//! seeds sown into it on the way round and seeds moved there by a capture.
//! A sequence that finished elsewhere can still out-gain one that ended in
//! its store.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Player, PlayerMap, RaceTieBreak};

/// Why a player won the right to move first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceReason {
    /// Gained strictly more seeds into their own store.
    MoreStoreSeeds,
    /// Gains were equal and only this player stopped on their own side.
    StoppedOnOwnSide,
    /// Nothing separated the players; Player A moves first.
    Convention,
    /// Their sequence terminated first.
    FinishedFirst,
}

/// Everything the tie-break rules look at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceOutcome {
    /// Seeds each player put into their own store during the race.
    pub store_gain: PlayerMap<u32>,
    /// Slot where each player's last seed landed.
    pub final_slot: PlayerMap<usize>,
    /// Players in the order their sequences terminated.
    pub finish_order: SmallVec<[Player; 2]>,
}

/// The first mover and the rule that picked them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RaceResolution {
    pub first: Player,
    pub reason: RaceReason,
}

impl RaceOutcome {
    /// True if `player`'s last seed stopped in one of their own holes.
    ///
    /// A sequence that ended in the store did not stop on a hole.
    #[must_use]
    pub fn stopped_on_own_side(&self, player: Player) -> bool {
        player.owns_hole(self.final_slot[player])
    }

    /// Pick the first mover under `policy`.
    ///
    /// ```
    /// use congkak_engine::core::{Player, PlayerMap, RaceTieBreak};
    /// use congkak_engine::race::{RaceOutcome, RaceReason};
    ///
    /// let outcome = RaceOutcome {
    ///     store_gain: PlayerMap::from_pair(2, 3),
    ///     final_slot: PlayerMap::new(|p| p.store()),
    ///     finish_order: [Player::A, Player::B].into_iter().collect(),
    /// };
    ///
    /// let resolution = outcome.resolve(RaceTieBreak::StoreGainThenSide);
    /// assert_eq!(resolution.first, Player::B);
    /// assert_eq!(resolution.reason, RaceReason::MoreStoreSeeds);
    /// ```
    #[must_use]
    pub fn resolve(&self, policy: RaceTieBreak) -> RaceResolution {
        match policy {
            RaceTieBreak::StoreGainThenSide => self.resolve_by_store_gain(),
            RaceTieBreak::FirstToFinish => self.resolve_by_finish_order(),
        }
    }

    fn resolve_by_store_gain(&self) -> RaceResolution {
        let (gain_a, gain_b) = (self.store_gain[Player::A], self.store_gain[Player::B]);
        if gain_a != gain_b {
            let first = if gain_a > gain_b { Player::A } else { Player::B };
            return RaceResolution {
                first,
                reason: RaceReason::MoreStoreSeeds,
            };
        }

        match (
            self.stopped_on_own_side(Player::A),
            self.stopped_on_own_side(Player::B),
        ) {
            (true, false) => RaceResolution {
                first: Player::A,
                reason: RaceReason::StoppedOnOwnSide,
            },
            (false, true) => RaceResolution {
                first: Player::B,
                reason: RaceReason::StoppedOnOwnSide,
            },
            _ => Self::convention(),
        }
    }

    fn resolve_by_finish_order(&self) -> RaceResolution {
        match self.finish_order.first() {
            Some(&first) => RaceResolution {
                first,
                reason: RaceReason::FinishedFirst,
            },
            None => Self::convention(),
        }
    }

    fn convention() -> RaceResolution {
        RaceResolution {
            first: Player::A,
            reason: RaceReason::Convention,
        }
    }
}
