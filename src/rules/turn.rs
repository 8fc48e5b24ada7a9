//! Phase transitions: setup choices, race hand-off, turn order, match end.
//!
//! The state machine owns the [`Phase`] and decides what happens after a
//! sequence terminates. It never sows; the engine runs sequences and reports
//! their outcomes here.
//!
//! ## Turn order
//!
//! - Last seed in the mover's store: the mover goes again.
//! - Anything else: the opponent moves.
//!
//! ## Empty sides
//!
//! Under [`EndRule::SkipEmptySide`] a player with nothing to sow is skipped
//! and the other player moves again; when both sides are empty the match
//! ends. Under [`EndRule::CollectOnEmptySide`] the first empty side after a
//! sequence ends the match and the seeds left on the other side go to their
//! owner's store.

use crate::core::{Board, EndRule, MoveError, Player, PlayerMap};
use crate::events::{EventSink, GameEvent};
use crate::race::RaceResolution;
use crate::sowing::{SowingOutcome, SowingSequence};

use super::phase::{GameResult, Phase};

/// Drives the match through its phases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnStateMachine {
    phase: Phase,
    end_rule: EndRule,
}

impl TurnStateMachine {
    /// Start in setup with no choices made.
    #[must_use]
    pub fn new(end_rule: EndRule) -> Self {
        Self {
            phase: Phase::setup(),
            end_rule,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Player to move during the turn phase.
    #[must_use]
    pub fn current_player(&self) -> Option<Player> {
        self.phase.current_player()
    }

    /// Return to a fresh setup phase.
    pub fn reset(&mut self) {
        self.phase = Phase::setup();
    }

    // === Setup ===

    /// Record `player`'s race starting hole.
    ///
    /// Player A chooses first. Returns both starts once B has chosen, at
    /// which point the phase is [`Phase::Race`].
    pub fn choose_start(
        &mut self,
        player: Player,
        hole: usize,
        board: &Board,
        sink: &mut impl EventSink,
    ) -> Result<Option<PlayerMap<usize>>, MoveError> {
        let Phase::Setup { start_a, start_b } = self.phase else {
            return Err(self.wrong_phase("choose_start"));
        };

        match (player, start_a) {
            (Player::A, Some(_)) => return Err(MoveError::StartAlreadyChosen { player }),
            (Player::B, None) => {
                return Err(MoveError::NotYourTurn {
                    player,
                    expected: Player::A,
                })
            }
            _ => {}
        }
        SowingSequence::check_start(player, hole, board)?;

        sink.emit(GameEvent::StartChosen { player, hole });
        tracing::debug!(%player, hole, "start chosen");

        match (player, start_a) {
            (Player::B, Some(a)) => {
                self.phase = Phase::Race;
                Ok(Some(PlayerMap::from_pair(a, hole)))
            }
            _ => {
                self.phase = Phase::Setup {
                    start_a: Some(hole),
                    start_b,
                };
                Ok(None)
            }
        }
    }

    /// Check that `player` may sow from `hole` now.
    pub fn check_turn_move(
        &self,
        player: Player,
        hole: usize,
        board: &Board,
    ) -> Result<(), MoveError> {
        let Phase::Turn { player: expected } = self.phase else {
            return Err(self.wrong_phase("select_hole"));
        };
        if player != expected {
            return Err(MoveError::NotYourTurn { player, expected });
        }
        SowingSequence::check_start(player, hole, board)
    }

    /// Holes `player` could choose right now.
    #[must_use]
    pub fn legal_holes(&self, player: Player, board: &Board) -> Vec<usize> {
        let choosing = match &self.phase {
            Phase::Setup { start_a, start_b } => match player {
                Player::A => start_a.is_none(),
                Player::B => start_a.is_some() && start_b.is_none(),
            },
            Phase::Turn { player: mover } => *mover == player,
            Phase::Race | Phase::Ended { .. } => false,
        };
        if !choosing {
            return Vec::new();
        }
        player.holes().filter(|&hole| board.get(hole) > 0).collect()
    }

    // === Transitions ===

    /// Hand the first move to the race winner.
    pub fn finish_race(
        &mut self,
        resolution: RaceResolution,
        board: &mut Board,
        sink: &mut impl EventSink,
    ) {
        sink.emit(GameEvent::RaceResolved {
            first: resolution.first,
            reason: resolution.reason,
        });
        tracing::info!(first = %resolution.first, reason = ?resolution.reason, "race resolved");
        self.start_turns(resolution.first, board, sink);
    }

    /// Enter the turn phase with `first` to move.
    ///
    /// Empty sides are handled as after any sequence: `first` may be
    /// skipped, or the match may end at once.
    pub fn start_turns(&mut self, first: Player, board: &mut Board, sink: &mut impl EventSink) {
        self.hand_over(None, first, board, sink);
    }

    /// Apply the turn-order rule after `player`'s sequence ended.
    pub fn finish_turn(
        &mut self,
        player: Player,
        outcome: SowingOutcome,
        board: &mut Board,
        sink: &mut impl EventSink,
    ) {
        let next = match outcome {
            SowingOutcome::ExtraTurn { .. } => player,
            _ => player.other(),
        };
        self.hand_over(Some(player), next, board, sink);
    }

    fn hand_over(
        &mut self,
        previous: Option<Player>,
        next: Player,
        board: &mut Board,
        sink: &mut impl EventSink,
    ) {
        if self.end_rule == EndRule::CollectOnEmptySide
            && Player::ALL.into_iter().any(|p| board.is_side_empty(p))
        {
            self.end_match(board, sink);
            return;
        }

        let mover = if board.is_side_empty(next) {
            sink.emit(GameEvent::TurnSkipped { player: next });
            tracing::debug!(player = %next, "empty side, turn skipped");
            if board.is_side_empty(next.other()) {
                self.end_match(board, sink);
                return;
            }
            next.other()
        } else {
            next
        };

        self.phase = Phase::Turn { player: mover };
        if previous != Some(mover) {
            sink.emit(GameEvent::TurnChanged { player: mover });
        }
    }

    fn end_match(&mut self, board: &mut Board, sink: &mut impl EventSink) {
        for player in Player::ALL {
            board.collect_side(player);
        }
        let scores = PlayerMap::new(|p| board.store_of(p));
        let result = GameResult::from_scores(&scores);

        sink.emit(GameEvent::GameEnded {
            score_a: scores[Player::A],
            score_b: scores[Player::B],
            result,
        });
        tracing::info!(
            score_a = scores[Player::A],
            score_b = scores[Player::B],
            ?result,
            "match ended"
        );
        self.phase = Phase::Ended { scores, result };
    }

    fn wrong_phase(&self, command: &'static str) -> MoveError {
        MoveError::WrongPhase {
            command,
            phase: self.phase.name(),
        }
    }
}
