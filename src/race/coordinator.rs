//! Running both race sequences against one board.

use smallvec::SmallVec;

use super::resolution::RaceOutcome;
use super::scheduler::RaceScheduler;
use crate::core::{Board, CancellationToken, MatchLifecycle, MoveError, Player, PlayerMap};
use crate::events::{EventSink, GameEvent};
use crate::sowing::{SowingMode, SowingSequence, Step};

/// Where the race stands after a resume.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RaceStatus {
    /// At least one sequence is still sowing.
    Running,
    /// Both sequences terminated.
    Complete(RaceOutcome),
    /// The match was replaced; the race is abandoned.
    Aborted,
}

/// Owns the two concurrent race sequences and records finish order.
#[derive(Clone, Debug)]
pub struct RaceCoordinator {
    sequences: PlayerMap<SowingSequence>,
    finish_order: SmallVec<[Player; 2]>,
}

impl RaceCoordinator {
    /// Pick up both starting holes and return the running race.
    ///
    /// Both holes are validated before either is picked up, so a rejected
    /// start leaves the board untouched. A's pickup happens first.
    pub fn start(
        starts: PlayerMap<usize>,
        board: &mut Board,
        lifecycle: &MatchLifecycle,
        sink: &mut impl EventSink,
    ) -> Result<Self, MoveError> {
        for (player, &hole) in starts.iter() {
            SowingSequence::check_start(player, hole, board)?;
        }

        sink.emit(GameEvent::RaceStarted {
            start_a: starts[Player::A],
            start_b: starts[Player::B],
        });

        let a = SowingSequence::begin(
            Player::A,
            starts[Player::A],
            SowingMode::Race,
            board,
            lifecycle,
            sink,
        )?;
        let b = SowingSequence::begin(
            Player::B,
            starts[Player::B],
            SowingMode::Race,
            board,
            lifecycle,
            sink,
        )?;

        tracing::debug!(
            start_a = starts[Player::A],
            start_b = starts[Player::B],
            "race started"
        );

        Ok(Self {
            sequences: PlayerMap::from_pair(a, b),
            finish_order: SmallVec::new(),
        })
    }

    // === Driving ===

    /// Land one seed of `player`'s sequence.
    ///
    /// Fails if that sequence has already terminated; the other one may
    /// still be running.
    pub fn advance(
        &mut self,
        player: Player,
        board: &mut Board,
        lifecycle: &MatchLifecycle,
        sink: &mut impl EventSink,
    ) -> Result<RaceStatus, MoveError> {
        let sequence = &self.sequences[player];
        if sequence.is_done() && !sequence.is_aborted() {
            return Err(MoveError::RaceSequenceFinished { player });
        }
        Ok(self.step_player(player, board, lifecycle, sink))
    }

    /// Land one seed of whichever sequence `scheduler` picks.
    pub fn resume<S: RaceScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        board: &mut Board,
        lifecycle: &MatchLifecycle,
        sink: &mut impl EventSink,
    ) -> RaceStatus {
        let ready = self.ready();
        if ready.is_empty() {
            return self.status();
        }
        let player = scheduler.next(&ready);
        self.step_player(player, board, lifecycle, sink)
    }

    /// Resume until both sequences terminate or the race aborts.
    pub fn run_to_end<S: RaceScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
        board: &mut Board,
        lifecycle: &MatchLifecycle,
        sink: &mut impl EventSink,
    ) -> RaceStatus {
        loop {
            let status = self.resume(scheduler, board, lifecycle, sink);
            if status != RaceStatus::Running {
                return status;
            }
        }
    }

    fn step_player(
        &mut self,
        player: Player,
        board: &mut Board,
        lifecycle: &MatchLifecycle,
        sink: &mut impl EventSink,
    ) -> RaceStatus {
        let sequence = &mut self.sequences[player];
        let was_running = !sequence.is_done();
        match sequence.step(board, lifecycle, sink) {
            Step::Finished(_) if was_running => self.finish_order.push(player),
            Step::Aborted => return RaceStatus::Aborted,
            _ => {}
        }
        self.status()
    }

    // === Queries ===

    /// Players whose sequences are still running, A first.
    #[must_use]
    pub fn ready(&self) -> SmallVec<[Player; 2]> {
        Player::ALL
            .into_iter()
            .filter(|&p| !self.sequences[p].is_done())
            .collect()
    }

    /// Current state of the race.
    #[must_use]
    pub fn status(&self) -> RaceStatus {
        if self.sequences.iter().any(|(_, s)| s.is_aborted()) {
            return RaceStatus::Aborted;
        }
        match self.outcome() {
            Some(outcome) => RaceStatus::Complete(outcome),
            None => RaceStatus::Running,
        }
    }

    /// The race outcome, once both sequences have terminated.
    #[must_use]
    pub fn outcome(&self) -> Option<RaceOutcome> {
        let a = self.sequences[Player::A].outcome()?;
        let b = self.sequences[Player::B].outcome()?;
        Some(RaceOutcome {
            store_gain: PlayerMap::new(|p| self.sequences[p].store_gain()),
            final_slot: PlayerMap::from_pair(a.final_slot(), b.final_slot()),
            finish_order: self.finish_order.clone(),
        })
    }

    /// True once both sequences have terminated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.status(), RaceStatus::Complete(_))
    }

    /// One player's sequence.
    #[must_use]
    pub fn sequence(&self, player: Player) -> &SowingSequence {
        &self.sequences[player]
    }

    /// Token shared by both sequences.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        self.sequences[Player::A].token()
    }

    /// Seeds currently held by both sequences.
    #[must_use]
    pub fn seeds_in_hand(&self) -> u32 {
        self.sequences.iter().map(|(_, s)| s.hand()).sum()
    }

    /// Players in the order their sequences terminated.
    #[must_use]
    pub fn finish_order(&self) -> &[Player] {
        &self.finish_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Board;
    use crate::race::Alternating;
    use crate::sowing::SowingOutcome;

    fn started(board: &mut Board, lifecycle: &MatchLifecycle, a: usize, b: usize) -> RaceCoordinator {
        let mut events = Vec::new();
        RaceCoordinator::start(
            PlayerMap::from_pair(a, b),
            board,
            lifecycle,
            &mut events,
        )
        .unwrap()
    }

    fn live_lifecycle() -> MatchLifecycle {
        let mut lifecycle = MatchLifecycle::new();
        lifecycle.advance();
        lifecycle
    }

    #[test]
    fn test_start_picks_up_both_holes() {
        let lifecycle = live_lifecycle();
        let mut board = Board::standard(7);
        let mut events = Vec::new();

        let race = RaceCoordinator::start(
            PlayerMap::from_pair(0, 8),
            &mut board,
            &lifecycle,
            &mut events,
        )
        .unwrap();

        assert_eq!(board.get(0), 0);
        assert_eq!(board.get(8), 0);
        assert_eq!(race.seeds_in_hand(), 14);
        assert_eq!(board.total() + race.seeds_in_hand(), 98);
        assert_eq!(
            events[0],
            GameEvent::RaceStarted {
                start_a: 0,
                start_b: 8
            }
        );
        assert_eq!(race.ready().as_slice(), &[Player::A, Player::B]);
    }

    #[test]
    fn test_invalid_start_leaves_board_untouched() {
        let lifecycle = live_lifecycle();
        let mut board = Board::standard(7);
        board.set(9, 0);
        let before = board;
        let mut events = Vec::new();

        let result = RaceCoordinator::start(
            PlayerMap::from_pair(0, 9),
            &mut board,
            &lifecycle,
            &mut events,
        );

        assert_eq!(result.unwrap_err(), MoveError::EmptyHole { hole: 9 });
        assert_eq!(board, before);
        assert!(events.is_empty());
    }

    #[test]
    fn test_both_store_finish() {
        // Hole 0 and hole 8 each reach their own store with the seventh seed.
        let lifecycle = live_lifecycle();
        let mut board = Board::standard(7);
        let mut race = started(&mut board, &lifecycle, 0, 8);
        let mut events = Vec::new();

        let status = race.run_to_end(&mut Alternating::default(), &mut board, &lifecycle, &mut events);

        let RaceStatus::Complete(outcome) = status else {
            panic!("race did not complete: {status:?}");
        };
        assert_eq!(outcome.store_gain[Player::A], 1);
        assert_eq!(outcome.store_gain[Player::B], 1);
        assert_eq!(outcome.final_slot[Player::A], 7);
        assert_eq!(outcome.final_slot[Player::B], 15);
        assert_eq!(outcome.finish_order.as_slice(), &[Player::A, Player::B]);
        assert_eq!(
            race.sequence(Player::A).outcome(),
            Some(SowingOutcome::RaceFinished { store: 7 })
        );
        assert_eq!(board.total(), 98);
        assert_eq!(race.seeds_in_hand(), 0);
    }

    #[test]
    fn test_interleaving_shares_board() {
        let lifecycle = live_lifecycle();
        let mut board = Board::standard(7);
        let mut race = started(&mut board, &lifecycle, 0, 8);
        let mut events = Vec::new();

        assert_eq!(
            race.advance(Player::A, &mut board, &lifecycle, &mut events),
            Ok(RaceStatus::Running)
        );
        assert_eq!(board.get(1), 8);
        assert_eq!(
            race.advance(Player::B, &mut board, &lifecycle, &mut events),
            Ok(RaceStatus::Running)
        );
        assert_eq!(board.get(9), 8);
        assert_eq!(race.seeds_in_hand(), 12);
        assert_eq!(board.total() + race.seeds_in_hand(), 98);
    }

    #[test]
    fn test_advance_finished_sequence_rejected() {
        let lifecycle = live_lifecycle();
        let mut board = Board::standard(7);
        let mut race = started(&mut board, &lifecycle, 0, 8);
        let mut events = Vec::new();

        for _ in 0..7 {
            race.advance(Player::A, &mut board, &lifecycle, &mut events)
                .unwrap();
        }
        assert_eq!(race.finish_order(), &[Player::A]);
        assert_eq!(race.ready().as_slice(), &[Player::B]);

        let err = race
            .advance(Player::A, &mut board, &lifecycle, &mut events)
            .unwrap_err();
        assert_eq!(err, MoveError::RaceSequenceFinished { player: Player::A });
        assert!(!race.is_complete());
    }

    #[test]
    fn test_finish_order_records_first_finisher() {
        let lifecycle = live_lifecycle();
        let mut board = Board::standard(7);
        let mut race = started(&mut board, &lifecycle, 0, 8);
        let mut events = Vec::new();

        for _ in 0..7 {
            race.advance(Player::B, &mut board, &lifecycle, &mut events)
                .unwrap();
        }
        let status = race.run_to_end(&mut Alternating::default(), &mut board, &lifecycle, &mut events);

        let RaceStatus::Complete(outcome) = status else {
            panic!("race did not complete");
        };
        assert_eq!(outcome.finish_order.as_slice(), &[Player::B, Player::A]);
    }

    #[test]
    fn test_capture_counts_toward_race_gain() {
        // A's single seed lands in empty hole 5 and captures hole 9; B stops
        // at 14 with nothing across.
        let lifecycle = live_lifecycle();
        let mut slots = [0; 16];
        slots[4] = 1;
        slots[9] = 3;
        slots[12] = 2;
        let mut board = Board::from_slots(slots);
        let mut race = started(&mut board, &lifecycle, 4, 12);
        let mut events = Vec::new();

        let status = race.run_to_end(&mut Alternating::default(), &mut board, &lifecycle, &mut events);

        let RaceStatus::Complete(outcome) = status else {
            panic!("race did not complete: {status:?}");
        };
        assert_eq!(outcome.store_gain[Player::A], 4);
        assert_eq!(outcome.store_gain[Player::B], 0);
        assert_eq!(outcome.final_slot[Player::A], 5);
        assert_eq!(board.store_of(Player::A), 4);

        let resolution = outcome.resolve(crate::core::RaceTieBreak::StoreGainThenSide);
        assert_eq!(resolution.first, Player::A);
        assert_eq!(resolution.reason, crate::race::RaceReason::MoreStoreSeeds);
    }

    #[test]
    fn test_stale_race_aborts() {
        let mut lifecycle = live_lifecycle();
        let mut board = Board::standard(7);
        let mut race = started(&mut board, &lifecycle, 0, 8);

        lifecycle.advance();
        let fresh = Board::standard(7);
        let mut board = fresh;
        let mut events = Vec::new();

        let status = race.resume(&mut Alternating::default(), &mut board, &lifecycle, &mut events);

        assert_eq!(status, RaceStatus::Aborted);
        assert_eq!(board, fresh);
        assert!(events.is_empty());
        assert_eq!(race.status(), RaceStatus::Aborted);
    }
}
