//! Match lifecycle tests.
//!
//! Starting a new match while sowing is in flight must never let the old
//! sequences touch the new board.

use congkak_engine::core::{
    Board, Generation, MatchConfig, MatchLifecycle, MoveKind, Player, RaceMode,
};
use congkak_engine::events::GameEvent;
use congkak_engine::rules::{CongkakEngine, Phase, Tick};
use congkak_engine::sowing::{SowingMode, SowingSequence, Step};

/// New match mid-race: the orphaned race aborts silently on the next tick.
#[test]
fn test_new_match_orphans_running_race() {
    let mut engine = CongkakEngine::standard();
    engine.choose_start(Player::A, 2).unwrap();
    engine.choose_start(Player::B, 9).unwrap();
    for _ in 0..3 {
        assert_eq!(engine.tick(), Tick::Progressed);
    }

    let generation = engine.start_new_match();
    assert_eq!(generation, Generation(2));
    assert_eq!(engine.board(), &Board::standard(7));
    assert_eq!(engine.phase(), &Phase::setup());
    assert!(!engine.is_busy());
    assert_eq!(engine.seeds_in_hand(), 0);
    assert_eq!(
        engine.drain_events().last(),
        Some(&GameEvent::MatchStarted {
            generation: Generation(2)
        })
    );

    assert_eq!(engine.tick(), Tick::Aborted);
    assert_eq!(engine.tick(), Tick::Idle);
    assert_eq!(engine.board(), &Board::standard(7));
    assert!(engine.drain_events().is_empty());
}

/// New match mid-turn: the next command reaps the stale sequence first.
#[test]
fn test_command_after_new_match_reaps_stale_sequence() {
    let config = MatchConfig::default();
    let mut engine = CongkakEngine::from_position(config, Board::standard(7), Player::A).unwrap();
    engine.select_hole(Player::A, 2).unwrap();
    engine.tick();

    engine.start_new_match();
    engine.drain_events();
    engine.choose_start(Player::A, 0).unwrap();

    assert_eq!(engine.board(), &Board::standard(7));
    assert_eq!(
        engine.drain_events(),
        vec![GameEvent::StartChosen {
            player: Player::A,
            hole: 0
        }]
    );

    let history = engine.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].kind, MoveKind::RaceStart);
    assert_eq!(history[0].generation, Generation(2));
}

/// The new match plays normally after an orphaned race.
#[test]
fn test_new_match_after_interactive_race() {
    let config = MatchConfig::default().with_race_mode(RaceMode::Interactive);
    let mut engine = CongkakEngine::new(config).unwrap();
    engine.choose_start(Player::A, 0).unwrap();
    engine.choose_start(Player::B, 8).unwrap();
    engine.advance_race(Player::A).unwrap();

    engine.start_new_match();
    engine.choose_start(Player::A, 0).unwrap();
    engine.choose_start(Player::B, 8).unwrap();

    assert_eq!(engine.seeds_in_hand(), 14);
    for _ in 0..7 {
        engine.advance_race(Player::A).unwrap();
        engine.advance_race(Player::B).unwrap();
    }
    assert_eq!(engine.current_player(), Some(Player::A));
    assert_eq!(engine.board().total(), 98);
}

/// Repeated restarts keep the generation strictly increasing.
#[test]
fn test_generations_increase() {
    let mut engine = CongkakEngine::standard();
    let mut last = engine.generation();
    for _ in 0..5 {
        let next = engine.start_new_match();
        assert!(next > last);
        assert_eq!(engine.generation(), next);
        last = next;
    }
}

/// A stale sequence stepped directly leaves the board and sink alone.
#[test]
fn test_stale_token_blocks_every_mutation() {
    let mut lifecycle = MatchLifecycle::new();
    lifecycle.advance();
    let mut board = Board::standard(7);
    let mut events = Vec::new();

    let mut seq = SowingSequence::begin(
        Player::B,
        10,
        SowingMode::Turn,
        &mut board,
        &lifecycle,
        &mut events,
    )
    .unwrap();
    seq.step(&mut board, &lifecycle, &mut events);

    lifecycle.advance();
    let frozen = board;
    events.clear();

    for _ in 0..3 {
        assert_eq!(seq.step(&mut board, &lifecycle, &mut events), Step::Aborted);
    }
    assert!(seq.is_aborted());
    assert_eq!(board, frozen);
    assert!(events.is_empty());
}
