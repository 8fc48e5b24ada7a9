//! Race schedulers: who lands the next seed.

use crate::core::{GameRng, GameRngState, Player};

/// Policy for interleaving the two race sequences.
pub trait RaceScheduler {
    /// Pick which of the `ready` players resumes next.
    ///
    /// `ready` lists players whose sequences are still running, A first,
    /// and is never empty.
    fn next(&mut self, ready: &[Player]) -> Player;
}

/// Strict alternation, A first, falling back to whoever is left.
#[derive(Clone, Debug, Default)]
pub struct Alternating {
    last: Option<Player>,
}

impl RaceScheduler for Alternating {
    fn next(&mut self, ready: &[Player]) -> Player {
        let pick = match self.last {
            Some(last) if ready.contains(&last.other()) => last.other(),
            _ => ready[0],
        };
        self.last = Some(pick);
        pick
    }
}

/// Random interleaving from a seeded RNG, standing in for uneven
/// animation pacing. Reproducible for a given seed.
#[derive(Clone, Debug)]
pub struct Jittered {
    rng: GameRng,
}

impl Jittered {
    /// Create a scheduler drawing from `rng`.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Resume a scheduler from a saved RNG state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        Self::new(GameRng::from_state(state))
    }

    /// Current RNG state; picks continue from here.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }
}

impl RaceScheduler for Jittered {
    fn next(&mut self, ready: &[Player]) -> Player {
        self.rng.choose(ready).copied().unwrap_or(Player::A)
    }
}

/// The schedulers selectable through configuration.
#[derive(Clone, Debug)]
pub enum BuiltinScheduler {
    Alternating(Alternating),
    Jittered(Jittered),
}

impl BuiltinScheduler {
    /// RNG state for schedulers that draw randomly.
    #[must_use]
    pub fn rng_state(&self) -> Option<GameRngState> {
        match self {
            BuiltinScheduler::Alternating(_) => None,
            BuiltinScheduler::Jittered(s) => Some(s.rng_state()),
        }
    }
}

impl RaceScheduler for BuiltinScheduler {
    fn next(&mut self, ready: &[Player]) -> Player {
        match self {
            BuiltinScheduler::Alternating(s) => s.next(ready),
            BuiltinScheduler::Jittered(s) => s.next(ready),
        }
    }
}
