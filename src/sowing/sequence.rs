//! The sowing step machine.

use serde::{Deserialize, Serialize};

use crate::core::{Board, CancellationToken, MatchLifecycle, MoveError, Player, SLOT_COUNT};
use crate::events::{EventSink, GameEvent};

/// Which phase a sequence is running in. Only changes how a store landing
/// is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SowingMode {
    /// Normal turn: a store landing earns another move.
    Turn,
    /// Opening race: a store landing just finishes the sequence.
    Race,
}

/// How a sequence ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SowingOutcome {
    /// Last seed in the mover's own store during a turn.
    ExtraTurn { store: usize },
    /// Last seed in the mover's own store during the race.
    RaceFinished { store: usize },
    /// Last seed made a single-seed hole and nothing was captured.
    Stopped { slot: usize },
    /// Last seed made a single-seed hole on the mover's side and took the
    /// `count` seeds opposite along with it.
    Captured {
        slot: usize,
        opposite: usize,
        count: u32,
    },
}

impl SowingOutcome {
    /// The slot the last seed landed in.
    #[must_use]
    pub fn final_slot(&self) -> usize {
        match *self {
            SowingOutcome::ExtraTurn { store } | SowingOutcome::RaceFinished { store } => store,
            SowingOutcome::Stopped { slot } | SowingOutcome::Captured { slot, .. } => slot,
        }
    }

    /// True when the sequence ended in the mover's store.
    #[must_use]
    pub fn ended_in_store(&self) -> bool {
        matches!(
            self,
            SowingOutcome::ExtraTurn { .. } | SowingOutcome::RaceFinished { .. }
        )
    }
}

/// Result of resuming a sequence once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// One seed landed in `to` and the sequence continues.
    Sowed { to: usize },
    /// The sequence is over.
    Finished(SowingOutcome),
    /// The match moved on; nothing was touched.
    Aborted,
}

impl Step {
    /// The terminal outcome, if this step finished the sequence.
    #[must_use]
    pub fn outcome(&self) -> Option<SowingOutcome> {
        match self {
            Step::Finished(outcome) => Some(*outcome),
            Step::Sowed { .. } | Step::Aborted => None,
        }
    }

    /// True when the sequence will not produce further steps.
    #[must_use]
    pub fn is_done(&self) -> bool {
        !matches!(self, Step::Sowed { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Progress {
    Sowing { position: usize, hand: u32 },
    Finished(SowingOutcome),
    Aborted,
}

/// One player's sowing sequence.
#[derive(Clone, Debug)]
pub struct SowingSequence {
    player: Player,
    mode: SowingMode,
    start: usize,
    token: CancellationToken,
    progress: Progress,
    store_gain: u32,
    seeds_sown: u32,
}

impl SowingSequence {
    /// Validate the starting hole, pick up its seeds, and return the
    /// sequence ready for its first deposit.
    pub fn begin(
        player: Player,
        start: usize,
        mode: SowingMode,
        board: &mut Board,
        lifecycle: &MatchLifecycle,
        sink: &mut impl EventSink,
    ) -> Result<Self, MoveError> {
        Self::check_start(player, start, board)?;

        let hand = board.zero(start);
        sink.emit(GameEvent::SeedPickedUp {
            player,
            slot: start,
            count: hand,
        });
        tracing::debug!(%player, start, hand, ?mode, "sowing sequence started");

        Ok(Self {
            player,
            mode,
            start,
            token: lifecycle.token(),
            progress: Progress::Sowing {
                position: start,
                hand,
            },
            store_gain: 0,
            seeds_sown: 0,
        })
    }

    /// Check that `player` may start sowing from `start` on `board`.
    pub fn check_start(player: Player, start: usize, board: &Board) -> Result<(), MoveError> {
        if start >= SLOT_COUNT {
            return Err(MoveError::HoleOutOfRange { hole: start });
        }
        if !player.owns_hole(start) {
            return Err(MoveError::NotOwnHole {
                player,
                hole: start,
            });
        }
        if board.get(start) == 0 {
            return Err(MoveError::EmptyHole { hole: start });
        }
        Ok(())
    }

    /// Resume the sequence: deposit one seed and resolve the landing.
    ///
    /// A sequence whose match has been replaced aborts here without any
    /// board mutation or event. Finished and aborted sequences keep
    /// returning their final step.
    pub fn step(
        &mut self,
        board: &mut Board,
        lifecycle: &MatchLifecycle,
        sink: &mut impl EventSink,
    ) -> Step {
        let (position, hand) = match self.progress {
            Progress::Sowing { position, hand } => (position, hand),
            Progress::Finished(outcome) => return Step::Finished(outcome),
            Progress::Aborted => return Step::Aborted,
        };

        if self.token.is_cancelled(lifecycle) {
            tracing::debug!(
                player = %self.player,
                stale = %self.token.generation(),
                current = %lifecycle.generation(),
                "stale sowing sequence aborted"
            );
            self.progress = Progress::Aborted;
            return Step::Aborted;
        }

        let to = self.next_slot(position);
        board.increment(to);
        self.seeds_sown += 1;
        if to == self.player.store() {
            self.store_gain += 1;
        }
        sink.emit(GameEvent::SeedLanded {
            player: self.player,
            from: position,
            to,
        });

        let hand = hand - 1;
        if hand > 0 {
            self.progress = Progress::Sowing { position: to, hand };
            return Step::Sowed { to };
        }

        self.land(to, board, sink)
    }

    /// Step until the sequence finishes or aborts.
    pub fn run_to_end(
        &mut self,
        board: &mut Board,
        lifecycle: &MatchLifecycle,
        sink: &mut impl EventSink,
    ) -> Step {
        loop {
            let step = self.step(board, lifecycle, sink);
            if step.is_done() {
                return step;
            }
        }
    }

    /// Resolve the slot the last seed in hand landed in.
    fn land(&mut self, slot: usize, board: &mut Board, sink: &mut impl EventSink) -> Step {
        let player = self.player;

        if slot == player.store() {
            let outcome = match self.mode {
                SowingMode::Turn => {
                    sink.emit(GameEvent::ExtraTurn { player });
                    SowingOutcome::ExtraTurn { store: slot }
                }
                SowingMode::Race => {
                    sink.emit(GameEvent::RaceFinished { player });
                    SowingOutcome::RaceFinished { store: slot }
                }
            };
            return self.finish(outcome);
        }

        let count = board.get(slot);
        if count > 1 {
            let hand = board.zero(slot);
            sink.emit(GameEvent::SeedPickedUp {
                player,
                slot,
                count: hand,
            });
            tracing::trace!(%player, slot, hand, "relay pickup");
            self.progress = Progress::Sowing {
                position: slot,
                hand,
            };
            return Step::Sowed { to: slot };
        }

        let mut outcome = SowingOutcome::Stopped { slot };
        if player.owns_hole(slot) {
            let opposite = Board::opposite(slot);
            if board.get(opposite) > 0 {
                let count = board.zero(opposite);
                let landing = board.zero(slot);
                board.add(player.store(), count + landing);
                self.store_gain += count + landing;
                sink.emit(GameEvent::Captured {
                    player,
                    landing: slot,
                    opposite,
                    count,
                });
                tracing::debug!(%player, slot, opposite, count, "capture");
                outcome = SowingOutcome::Captured {
                    slot,
                    opposite,
                    count,
                };
            }
        }
        sink.emit(GameEvent::Stopped { player, slot });
        self.finish(outcome)
    }

    fn finish(&mut self, outcome: SowingOutcome) -> Step {
        tracing::debug!(
            player = %self.player,
            ?outcome,
            seeds_sown = self.seeds_sown,
            store_gain = self.store_gain,
            "sowing sequence finished"
        );
        self.progress = Progress::Finished(outcome);
        Step::Finished(outcome)
    }

    /// Next slot after `position`, skipping the opponent's store.
    fn next_slot(&self, position: usize) -> usize {
        let next = (position + 1) % SLOT_COUNT;
        if next == self.player.opponent_store() {
            (next + 1) % SLOT_COUNT
        } else {
            next
        }
    }

    // === Accessors ===

    /// The sowing player.
    #[must_use]
    pub fn player(&self) -> Player {
        self.player
    }

    /// Turn or race.
    #[must_use]
    pub fn mode(&self) -> SowingMode {
        self.mode
    }

    /// Hole the sequence started from.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Generation token captured at the start.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        self.token
    }

    /// Seeds currently in hand (off the board).
    #[must_use]
    pub fn hand(&self) -> u32 {
        match self.progress {
            Progress::Sowing { hand, .. } => hand,
            Progress::Finished(_) | Progress::Aborted => 0,
        }
    }

    /// Seeds this sequence has put into the mover's store so far, from
    /// sowing and from captures.
    #[must_use]
    pub fn store_gain(&self) -> u32 {
        self.store_gain
    }

    /// Single-seed deposits made so far.
    #[must_use]
    pub fn seeds_sown(&self) -> u32 {
        self.seeds_sown
    }

    /// The terminal outcome, once finished.
    #[must_use]
    pub fn outcome(&self) -> Option<SowingOutcome> {
        match self.progress {
            Progress::Finished(outcome) => Some(outcome),
            Progress::Sowing { .. } | Progress::Aborted => None,
        }
    }

    /// True once the sequence has finished or aborted.
    #[must_use]
    pub fn is_done(&self) -> bool {
        !matches!(self.progress, Progress::Sowing { .. })
    }

    /// True if the sequence was cancelled by a new match.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.progress == Progress::Aborted
    }
}
