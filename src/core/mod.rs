//! Core engine types: board, players, lifecycle, configuration, errors.
//!
//! Sowing order and turn flow live in the `sowing`, `race` and `rules`
//! modules, which build on these pieces.

pub mod action;
pub mod board;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod player;
pub mod rng;

pub use action::{MoveKind, MoveRecord};
pub use board::{
    Board, DEFAULT_SEEDS_PER_HOLE, HOLES_PER_SIDE, SLOT_COUNT, STORE_A, STORE_B,
};
pub use config::{EndRule, MatchConfig, RaceMode, RaceTieBreak};
pub use error::{ConfigError, MoveError};
pub use lifecycle::{CancellationToken, Generation, MatchLifecycle};
pub use player::{Player, PlayerMap};
pub use rng::{GameRng, GameRngState};
