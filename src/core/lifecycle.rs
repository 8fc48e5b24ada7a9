//! Match generations and cooperative cancellation.
//!
//! Every new match bumps the generation. A sowing sequence captures a
//! `CancellationToken` when it starts and checks it before each mutating
//! step; a token from an older generation means the sequence belongs to a
//! match that no longer exists and must stop without touching the board.
//!
//! ```
//! use congkak_engine::core::MatchLifecycle;
//!
//! let mut lifecycle = MatchLifecycle::new();
//! let token = lifecycle.token();
//! assert!(!token.is_cancelled(&lifecycle));
//!
//! lifecycle.advance();
//! assert!(token.is_cancelled(&lifecycle));
//! ```

use serde::{Deserialize, Serialize};

/// Monotonic match counter value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    /// Get the raw counter value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Generation({})", self.0)
    }
}

/// Owner of the current match generation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLifecycle {
    generation: Generation,
}

impl MatchLifecycle {
    /// Create a lifecycle at generation 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current generation.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Start a new generation, orphaning every outstanding token.
    pub fn advance(&mut self) -> Generation {
        self.generation = Generation(self.generation.0 + 1);
        self.generation
    }

    /// Capture a token for the current generation.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            generation: self.generation,
        }
    }
}

/// Generation captured by an in-flight sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CancellationToken {
    generation: Generation,
}

impl CancellationToken {
    /// Generation this token was issued for.
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// True once `lifecycle` has moved past this token's generation.
    #[must_use]
    pub fn is_cancelled(&self, lifecycle: &MatchLifecycle) -> bool {
        self.generation != lifecycle.generation
    }
}
