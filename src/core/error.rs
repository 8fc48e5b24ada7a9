//! Error types for rejected commands and configuration loading.
//!
//! Stale sequences are not errors: they stop silently. Invariant
//! violations (negative slots, seeds drifting from the conserved total)
//! panic instead of being returned.

use std::path::PathBuf;

use super::player::Player;

/// Why a command was rejected. The engine state is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("hole {hole} is not on the board")]
    HoleOutOfRange { hole: usize },

    #[error("{command} is not accepted during the {phase} phase")]
    WrongPhase {
        command: &'static str,
        phase: &'static str,
    },

    #[error("it is {expected}'s move, not {player}'s")]
    NotYourTurn { player: Player, expected: Player },

    #[error("hole {hole} does not belong to {player}")]
    NotOwnHole { player: Player, hole: usize },

    #[error("hole {hole} is empty")]
    EmptyHole { hole: usize },

    #[error("{player} already chose a starting hole")]
    StartAlreadyChosen { player: Player },

    #[error("a sowing sequence is still in flight")]
    SequenceInFlight,

    #[error("the race is driven by a scheduler, not by advance signals")]
    RaceNotInteractive,

    #[error("{player}'s race sequence has already finished")]
    RaceSequenceFinished { player: Player },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
