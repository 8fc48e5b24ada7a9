//! The opening race.
//!
//! Once both players have chosen a starting hole, their two sowing
//! sequences run at the same time on the shared board. Neither sequence
//! waits for the other; they are resumed one seed at a time in whatever
//! order the driver chooses:
//!
//! - **Interactive**: each player's advance signal (key press, tap) resumes
//!   that player's sequence by one seed.
//! - **Scheduled**: a [`RaceScheduler`] picks which unfinished sequence
//!   resumes next ([`Alternating`] or the seeded [`Jittered`]).
//!
//! When both sequences have terminated, the [`RaceOutcome`] decides who
//! moves first in the turn phase. Resolution is a pure function of the
//! outcome and the configured [`RaceTieBreak`](crate::core::RaceTieBreak).

mod coordinator;
mod resolution;
mod scheduler;

pub use coordinator::{RaceCoordinator, RaceStatus};
pub use resolution::{RaceOutcome, RaceReason, RaceResolution};
pub use scheduler::{Alternating, BuiltinScheduler, Jittered, RaceScheduler};
