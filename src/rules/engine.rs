//! The match engine.
//!
//! ## Driving a match
//!
//! Commands validate and start work; they never run a sequence to the end.
//! The host calls [`CongkakEngine::tick`] (once per animation frame, say)
//! to land the next seed, or [`CongkakEngine::run_until_idle`] to play
//! everything out at once. Events accumulate until drained.
//!
//! ```
//! use congkak_engine::core::{MatchConfig, Player};
//! use congkak_engine::rules::{CongkakEngine, Phase};
//!
//! let mut engine = CongkakEngine::new(MatchConfig::default()).unwrap();
//! engine.choose_start(Player::A, 0).unwrap();
//! engine.choose_start(Player::B, 8).unwrap();
//! engine.run_until_idle();
//!
//! assert!(matches!(engine.phase(), Phase::Turn { .. }));
//! assert_eq!(engine.board().total(), 98);
//! ```
//!
//! ## New matches
//!
//! [`CongkakEngine::start_new_match`] bumps the generation and lays out a
//! fresh board immediately. Whatever was in flight stays where it is until
//! the next `tick` or command reaches it; it then sees the stale generation
//! and stops without touching the new board.

use im::Vector;

use crate::core::{
    Board, CancellationToken, ConfigError, Generation, GameRng, MatchConfig, MatchLifecycle,
    MoveError, MoveKind, MoveRecord, Player, PlayerMap, RaceMode,
};
use crate::events::{EventLog, EventSink, GameEvent};
use crate::race::{
    Alternating, BuiltinScheduler, Jittered, RaceCoordinator, RaceOutcome, RaceStatus,
};
use crate::sowing::{SowingMode, SowingOutcome, SowingSequence, Step};

use super::phase::{GameResult, Phase};
use super::snapshot::MatchSnapshot;
use super::turn::TurnStateMachine;

/// What a call to [`CongkakEngine::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tick {
    /// Nothing is in flight.
    Idle,
    /// A seed landed; any finished sequence has been applied.
    Progressed,
    /// An interactive race is waiting for advance signals.
    AwaitingAdvance,
    /// Work left over from a replaced match was discarded.
    Aborted,
}

/// Work that spans several ticks.
#[derive(Clone, Debug)]
enum InFlight {
    Turn(SowingSequence),
    Race(RaceCoordinator),
}

impl InFlight {
    fn token(&self) -> CancellationToken {
        match self {
            InFlight::Turn(sequence) => sequence.token(),
            InFlight::Race(race) => race.token(),
        }
    }

    fn seeds_in_hand(&self) -> u32 {
        match self {
            InFlight::Turn(sequence) => sequence.hand(),
            InFlight::Race(race) => race.seeds_in_hand(),
        }
    }
}

/// Congkak match engine.
#[derive(Clone, Debug)]
pub struct CongkakEngine {
    config: MatchConfig,
    board: Board,
    lifecycle: MatchLifecycle,
    turns: TurnStateMachine,
    in_flight: Option<InFlight>,
    scheduler: Option<BuiltinScheduler>,
    rng: GameRng,
    events: EventLog,
    history: Vector<MoveRecord>,
}

impl CongkakEngine {
    /// Validate `config` and start the first match.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// Engine with the standard configuration.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_valid_config(MatchConfig::default())
    }

    /// Start a match in the turn phase from an arbitrary position.
    ///
    /// The position must hold exactly the configured seed total. Setup and
    /// the race are skipped; `first` moves unless their side is empty.
    pub fn from_position(
        config: MatchConfig,
        board: Board,
        first: Player,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if board.total() != config.total_seeds() {
            return Err(ConfigError::Validation(format!(
                "position holds {} seeds, expected {}",
                board.total(),
                config.total_seeds()
            )));
        }

        let mut engine = Self::from_valid_config(config);
        engine.board = board;
        engine
            .turns
            .start_turns(first, &mut engine.board, &mut engine.events);
        Ok(engine)
    }

    fn from_valid_config(config: MatchConfig) -> Self {
        let mut engine = Self {
            board: Board::standard(config.seeds_per_hole),
            lifecycle: MatchLifecycle::new(),
            turns: TurnStateMachine::new(config.end_rule),
            in_flight: None,
            scheduler: None,
            rng: GameRng::new(config.seed),
            events: EventLog::new(),
            history: Vector::new(),
            config,
        };
        engine.start_new_match();
        engine
    }

    // === Commands ===

    /// Abandon the current match and lay out a fresh board.
    ///
    /// Accepted in every phase. Sequences still in flight are orphaned and
    /// stop at their next step.
    pub fn start_new_match(&mut self) -> Generation {
        let generation = self.lifecycle.advance();
        self.board = Board::standard(self.config.seeds_per_hole);
        self.turns.reset();
        self.history = Vector::new();
        self.events.emit(GameEvent::MatchStarted { generation });
        tracing::info!(
            %generation,
            seeds_per_hole = self.config.seeds_per_hole,
            orphaned = self.in_flight.is_some(),
            "match started"
        );
        self.debug_check_conservation();
        generation
    }

    /// Choose `player`'s race starting hole. A chooses first.
    ///
    /// The race begins as soon as B has chosen.
    pub fn choose_start(&mut self, player: Player, hole: usize) -> Result<(), MoveError> {
        self.reap_stale();
        let starts = self
            .turns
            .choose_start(player, hole, &self.board, &mut self.events)?;
        self.record(player, hole, MoveKind::RaceStart);

        if let Some(starts) = starts {
            self.begin_race(starts)?;
        }
        self.debug_check_conservation();
        Ok(())
    }

    /// Start `player`'s turn-phase sowing from `hole`.
    pub fn select_hole(&mut self, player: Player, hole: usize) -> Result<(), MoveError> {
        self.reap_stale();
        if self.in_flight.is_some() && matches!(self.turns.phase(), Phase::Turn { .. }) {
            return Err(MoveError::SequenceInFlight);
        }
        self.turns.check_turn_move(player, hole, &self.board)?;

        let sequence = SowingSequence::begin(
            player,
            hole,
            SowingMode::Turn,
            &mut self.board,
            &self.lifecycle,
            &mut self.events,
        )?;
        self.record(player, hole, MoveKind::Turn);
        self.in_flight = Some(InFlight::Turn(sequence));
        self.debug_check_conservation();
        Ok(())
    }

    /// Land one seed of `player`'s race sequence (interactive races only).
    pub fn advance_race(&mut self, player: Player) -> Result<Tick, MoveError> {
        self.reap_stale();
        if !matches!(self.turns.phase(), Phase::Race) {
            return Err(MoveError::WrongPhase {
                command: "advance_race",
                phase: self.turns.phase().name(),
            });
        }
        if self.config.race_mode != RaceMode::Interactive {
            return Err(MoveError::RaceNotInteractive);
        }
        let Some(InFlight::Race(mut race)) = self.in_flight.take() else {
            return Ok(Tick::Idle);
        };

        let status = match race.advance(player, &mut self.board, &self.lifecycle, &mut self.events)
        {
            Ok(status) => status,
            Err(err) => {
                self.in_flight = Some(InFlight::Race(race));
                return Err(err);
            }
        };
        let tick = self.settle_race(race, status);
        self.debug_check_conservation();
        Ok(tick)
    }

    /// Advance in-flight work by one seed.
    pub fn tick(&mut self) -> Tick {
        let Some(flight) = self.in_flight.take() else {
            return Tick::Idle;
        };
        let tick = match flight {
            InFlight::Turn(sequence) => self.tick_turn(sequence),
            InFlight::Race(race) => self.tick_race(race),
        };
        self.debug_check_conservation();
        tick
    }

    /// Tick until nothing is in flight or an interactive race needs input.
    pub fn run_until_idle(&mut self) -> Tick {
        loop {
            match self.tick() {
                Tick::Progressed | Tick::Aborted => continue,
                settled => return settled,
            }
        }
    }

    // === Queries ===

    /// Match configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> &Phase {
        self.turns.phase()
    }

    /// Player to move during the turn phase.
    #[must_use]
    pub fn current_player(&self) -> Option<Player> {
        self.turns.current_player()
    }

    /// Check whether all of `player`'s holes are empty.
    #[must_use]
    pub fn is_side_empty(&self, player: Player) -> bool {
        self.board.is_side_empty(player)
    }

    /// Store counts right now.
    #[must_use]
    pub fn scores(&self) -> PlayerMap<u32> {
        PlayerMap::new(|p| self.board.store_of(p))
    }

    /// Final store counts, once the match has ended.
    #[must_use]
    pub fn final_scores(&self) -> Option<PlayerMap<u32>> {
        match self.turns.phase() {
            Phase::Ended { scores, .. } => Some(*scores),
            _ => None,
        }
    }

    /// Match result, once the match has ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.turns.phase() {
            Phase::Ended { result, .. } => Some(*result),
            _ => None,
        }
    }

    /// Current match generation.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.lifecycle.generation()
    }

    /// Holes `player` could choose right now. Empty while sowing is in flight.
    #[must_use]
    pub fn legal_holes(&self, player: Player) -> Vec<usize> {
        if self.is_busy() {
            return Vec::new();
        }
        self.turns.legal_holes(player, &self.board)
    }

    /// True while a sequence of the current match is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.live_flight().is_some()
    }

    /// Seeds held by in-flight sequences of the current match.
    #[must_use]
    pub fn seeds_in_hand(&self) -> u32 {
        self.live_flight().map_or(0, InFlight::seeds_in_hand)
    }

    /// The running race, if any.
    #[must_use]
    pub fn race(&self) -> Option<&RaceCoordinator> {
        match self.live_flight() {
            Some(InFlight::Race(race)) => Some(race),
            _ => None,
        }
    }

    /// The running turn-phase sequence, if any.
    #[must_use]
    pub fn turn_sequence(&self) -> Option<&SowingSequence> {
        match self.live_flight() {
            Some(InFlight::Turn(sequence)) => Some(sequence),
            _ => None,
        }
    }

    /// Events not yet drained.
    #[must_use]
    pub fn pending_events(&self) -> &[GameEvent] {
        self.events.pending()
    }

    /// Take every pending event, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Moves of the current match, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Capture the current match.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            generation: self.generation(),
            config: self.config.clone(),
            board: self.board,
            phase: self.turns.phase().clone(),
            seeds_in_hand: self.seeds_in_hand(),
            history: self.history.clone(),
            rng: self.rng.state(),
            race_rng: self
                .race()
                .and(self.scheduler.as_ref())
                .and_then(BuiltinScheduler::rng_state),
        }
    }

    // === Internals ===

    fn live_flight(&self) -> Option<&InFlight> {
        self.in_flight
            .as_ref()
            .filter(|flight| !flight.token().is_cancelled(&self.lifecycle))
    }

    /// Let orphaned work observe its cancellation before a command runs.
    fn reap_stale(&mut self) {
        while self
            .in_flight
            .as_ref()
            .is_some_and(|flight| flight.token().is_cancelled(&self.lifecycle))
        {
            self.tick();
        }
    }

    fn begin_race(&mut self, starts: PlayerMap<usize>) -> Result<(), MoveError> {
        let race = RaceCoordinator::start(starts, &mut self.board, &self.lifecycle, &mut self.events)?;
        self.scheduler = match self.config.race_mode {
            RaceMode::Interactive => None,
            RaceMode::Alternating => Some(BuiltinScheduler::Alternating(Alternating::default())),
            RaceMode::Jittered => Some(BuiltinScheduler::Jittered(Jittered::new(self.rng.fork()))),
        };
        tracing::info!(
            start_a = starts[Player::A],
            start_b = starts[Player::B],
            mode = ?self.config.race_mode,
            "race started"
        );
        self.in_flight = Some(InFlight::Race(race));
        Ok(())
    }

    fn tick_turn(&mut self, mut sequence: SowingSequence) -> Tick {
        match sequence.step(&mut self.board, &self.lifecycle, &mut self.events) {
            Step::Sowed { .. } => {
                self.in_flight = Some(InFlight::Turn(sequence));
                Tick::Progressed
            }
            Step::Finished(outcome) => {
                let player = sequence.player();
                self.resolve_record(player, MoveKind::Turn, outcome);
                self.turns
                    .finish_turn(player, outcome, &mut self.board, &mut self.events);
                Tick::Progressed
            }
            Step::Aborted => Tick::Aborted,
        }
    }

    fn tick_race(&mut self, mut race: RaceCoordinator) -> Tick {
        let status = match self.scheduler.as_mut() {
            Some(scheduler) => {
                race.resume(scheduler, &mut self.board, &self.lifecycle, &mut self.events)
            }
            None if race.token().is_cancelled(&self.lifecycle) => race.resume(
                &mut Alternating::default(),
                &mut self.board,
                &self.lifecycle,
                &mut self.events,
            ),
            None => {
                self.in_flight = Some(InFlight::Race(race));
                return Tick::AwaitingAdvance;
            }
        };
        self.settle_race(race, status)
    }

    fn settle_race(&mut self, race: RaceCoordinator, status: RaceStatus) -> Tick {
        match status {
            RaceStatus::Running => {
                self.in_flight = Some(InFlight::Race(race));
                Tick::Progressed
            }
            RaceStatus::Complete(outcome) => {
                self.finish_race(&race, &outcome);
                Tick::Progressed
            }
            RaceStatus::Aborted => Tick::Aborted,
        }
    }

    fn finish_race(&mut self, race: &RaceCoordinator, outcome: &RaceOutcome) {
        for player in Player::ALL {
            if let Some(sowed) = race.sequence(player).outcome() {
                self.resolve_record(player, MoveKind::RaceStart, sowed);
            }
        }
        self.scheduler = None;
        let resolution = outcome.resolve(self.config.tie_break);
        self.turns
            .finish_race(resolution, &mut self.board, &mut self.events);
    }

    fn record(&mut self, player: Player, hole: usize, kind: MoveKind) {
        let sequence = u32::try_from(self.history.len()).unwrap_or(u32::MAX);
        self.history.push_back(MoveRecord::new(
            player,
            hole,
            kind,
            self.lifecycle.generation(),
            sequence,
        ));
    }

    fn resolve_record(&mut self, player: Player, kind: MoveKind, outcome: SowingOutcome) {
        let index = (0..self.history.len()).rev().find(|&i| {
            let record = &self.history[i];
            record.player == player && record.kind == kind && record.outcome.is_none()
        });
        if let Some(record) = index.and_then(|i| self.history.get_mut(i)) {
            record.outcome = Some(outcome);
        }
    }

    fn debug_check_conservation(&self) {
        debug_assert_eq!(
            self.board.total() + self.seeds_in_hand(),
            self.config.total_seeds(),
            "seed count drifted from the match total"
        );
    }
}

impl Default for CongkakEngine {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_engine_is_in_setup() {
        let mut engine = CongkakEngine::standard();

        assert_eq!(engine.phase(), &Phase::setup());
        assert_eq!(engine.generation(), Generation(1));
        assert_eq!(engine.board(), &Board::standard(7));
        assert_eq!(
            engine.drain_events(),
            vec![GameEvent::MatchStarted {
                generation: Generation(1)
            }]
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = CongkakEngine::new(MatchConfig::default().with_seeds_per_hole(0));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_commands_do_not_run_sequences() {
        let mut engine = CongkakEngine::standard();
        engine.choose_start(Player::A, 0).unwrap();
        engine.choose_start(Player::B, 8).unwrap();

        assert_eq!(engine.phase(), &Phase::Race);
        assert!(engine.is_busy());
        assert_eq!(engine.seeds_in_hand(), 14);
        assert_eq!(engine.board().total(), 84);

        assert_eq!(engine.tick(), Tick::Progressed);
        assert_eq!(engine.seeds_in_hand(), 13);
    }

    #[test]
    fn test_history_records_outcomes() {
        let mut engine = CongkakEngine::standard();
        engine.choose_start(Player::A, 0).unwrap();
        engine.choose_start(Player::B, 8).unwrap();
        engine.run_until_idle();

        let history = engine.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].kind, MoveKind::RaceStart);
        assert_eq!(
            history[0].outcome,
            Some(SowingOutcome::RaceFinished { store: 7 })
        );
        assert_eq!(history[1].sequence, 1);
        assert_eq!(
            history[1].outcome,
            Some(SowingOutcome::RaceFinished { store: 15 })
        );
    }

    #[test]
    fn test_from_position_checks_seed_total() {
        let result = CongkakEngine::from_position(MatchConfig::default(), Board::empty(), Player::A);
        assert!(matches!(result, Err(ConfigError::Validation(_))));

        let engine =
            CongkakEngine::from_position(MatchConfig::default(), Board::standard(7), Player::B)
                .unwrap();
        assert_eq!(engine.current_player(), Some(Player::B));
        assert_eq!(engine.legal_holes(Player::B).len(), 7);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut engine = CongkakEngine::standard();
        engine.choose_start(Player::A, 3).unwrap();

        let snapshot = engine.snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        let restored = MatchSnapshot::from_bytes(&bytes).unwrap();

        assert_eq!(restored, snapshot);
        assert_eq!(restored.seed_total(), 98);
        assert_eq!(restored.history.len(), 1);
        assert_eq!(restored.race_rng, None);
    }

    #[test]
    fn test_snapshot_replays_jittered_race() {
        use crate::race::RaceScheduler;

        let config = MatchConfig::default()
            .with_race_mode(RaceMode::Jittered)
            .with_seed(3);
        let mut engine = CongkakEngine::new(config).unwrap();
        engine.choose_start(Player::A, 2).unwrap();
        engine.choose_start(Player::B, 9).unwrap();
        for _ in 0..5 {
            engine.tick();
        }
        engine.drain_events();

        let state = engine.snapshot().race_rng.unwrap();
        let mut replay = Jittered::from_state(&state);

        while let Some(race) = engine.race() {
            let expected = replay.next(&race.ready());
            engine.tick();
            let landed = engine.drain_events().into_iter().find_map(|e| match e {
                GameEvent::SeedLanded { player, .. } => Some(player),
                _ => None,
            });
            assert_eq!(landed, Some(expected));
        }
        assert!(engine.snapshot().race_rng.is_none());
    }
}
