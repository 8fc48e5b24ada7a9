//! Engine events and the sinks that receive them.
//!
//! The engine never renders, animates, or plays sounds. It reports what
//! happened as a stream of `GameEvent`s; the presentation layer drains them
//! and decides how to show each one.

mod event;
mod sink;

pub use event::GameEvent;
pub use sink::{EventLog, EventSink};
