//! Sowing sequences.
//!
//! A sequence is one player's move from a single starting hole: pick up
//! the seeds, drop them one per slot around the ring (never into the
//! opponent's store), then either stop, capture, end in the store, or relay
//! by picking up the hole the last seed landed in.
//!
//! Sequences are resumable step machines. Each call to
//! [`SowingSequence::step`] deposits exactly one seed and resolves whatever
//! that landing triggers, then hands control back to the caller. Two
//! sequences can therefore share one board and be interleaved seed by seed,
//! which is how the race phase runs.
//!
//! ```
//! use congkak_engine::core::{Board, MatchLifecycle, Player};
//! use congkak_engine::events::GameEvent;
//! use congkak_engine::sowing::{SowingMode, SowingOutcome, SowingSequence};
//!
//! let mut board = Board::standard(7);
//! let lifecycle = MatchLifecycle::new();
//! let mut events: Vec<GameEvent> = Vec::new();
//!
//! // Seven seeds from hole 0 land in holes 1-6 and then the store.
//! let mut seq = SowingSequence::begin(Player::A, 0, SowingMode::Turn, &mut board, &lifecycle, &mut events)
//!     .unwrap();
//! let step = seq.run_to_end(&mut board, &lifecycle, &mut events);
//!
//! assert_eq!(step.outcome(), Some(SowingOutcome::ExtraTurn { store: 7 }));
//! assert_eq!(board.get(7), 1);
//! ```

mod sequence;

pub use sequence::{SowingMode, SowingOutcome, SowingSequence, Step};
