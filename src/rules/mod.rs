//! Match flow: phases, turn order, and the engine that drives them.
//!
//! [`CongkakEngine`] is the only entry point the presentation layer needs.
//! It accepts commands (`choose_start`, `select_hole`, `advance_race`,
//! `start_new_match`), advances in-flight sowing one seed per `tick`, and
//! buffers [`GameEvent`](crate::events::GameEvent)s for rendering.

mod engine;
mod phase;
mod snapshot;
mod turn;

pub use engine::{CongkakEngine, Tick};
pub use phase::{GameResult, Phase};
pub use snapshot::MatchSnapshot;
pub use turn::TurnStateMachine;
