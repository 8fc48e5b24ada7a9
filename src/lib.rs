//! # congkak-engine
//!
//! Rules engine for two-player Congkak with a simultaneous race opening.
//!
//! ## Design Principles
//!
//! 1. **Engine, not presentation**: The engine owns the board and the match
//!    flow. It reports what happened as `GameEvent`s and never draws,
//!    animates, or waits on a clock.
//!
//! 2. **One seed per step**: Sowing sequences are resumable step machines.
//!    The host decides pacing by calling `tick`; two race sequences share
//!    one board by being stepped in turn.
//!
//! 3. **Generations, not timers**: Starting a new match bumps a generation
//!    counter. Sequences carry the generation they started under and stop
//!    on their own when it is no longer current.
//!
//! ## Board
//!
//! 16 slots in sowing order: A's holes 0-6, A's store 7, B's holes 8-14,
//! B's store 15. Seeds are conserved: board plus seeds in hand always equals
//! `14 * seeds_per_hole`.
//!
//! ## Modules
//!
//! - `core`: Board, players, lifecycle, configuration, RNG, errors
//! - `events`: Game events and event sinks
//! - `sowing`: Single sowing sequence (pickup, relay, capture, store)
//! - `race`: Concurrent opening race and first-mover resolution
//! - `rules`: Phases, turn order, and the `CongkakEngine` orchestrator

pub mod core;
pub mod events;
pub mod race;
pub mod rules;
pub mod sowing;

// Re-export commonly used types
pub use crate::core::{
    Board, CancellationToken, ConfigError, EndRule, Generation, GameRng, MatchConfig,
    MatchLifecycle, MoveError, MoveKind, MoveRecord, Player, PlayerMap, RaceMode,
    RaceTieBreak,
};

pub use crate::events::{EventLog, EventSink, GameEvent};

pub use crate::sowing::{SowingMode, SowingOutcome, SowingSequence, Step};

pub use crate::race::{RaceCoordinator, RaceOutcome, RaceReason, RaceResolution, RaceStatus};

pub use crate::rules::{CongkakEngine, GameResult, MatchSnapshot, Phase, Tick};
