//! Match configuration.
//!
//! Variants of the ruleset are chosen here rather than hardcoded:
//! - `RaceTieBreak`: how the opening race decides the first mover
//! - `EndRule`: when an empty side ends the match
//! - `RaceMode`: who drives the race (player signals or a scheduler)
//!
//! Configs can be built in code with `with_*` methods or loaded from TOML:
//!
//! ```
//! use congkak_engine::core::{MatchConfig, RaceTieBreak};
//!
//! let config = MatchConfig::from_toml_str(r#"
//!     seeds_per_hole = 5
//!     tie_break = "first_to_finish"
//! "#).unwrap();
//!
//! assert_eq!(config.seeds_per_hole, 5);
//! assert_eq!(config.tie_break, RaceTieBreak::FirstToFinish);
//! assert_eq!(config.total_seeds(), 70);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::board::{DEFAULT_SEEDS_PER_HOLE, HOLES_PER_SIDE};
use super::error::ConfigError;

/// How the opening race picks who moves first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceTieBreak {
    /// More seeds gained into the own store wins; on a tie, the only player
    /// who stopped on their own side wins; otherwise Player A.
    #[default]
    StoreGainThenSide,
    /// Whichever sequence terminated first wins.
    FirstToFinish,
}

/// When an empty side ends the match.
///
/// The default skips an empty side and ends only when both sides are
/// empty. Ending (and collecting) as soon as one side runs dry needs
/// `CollectOnEmptySide`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndRule {
    /// A player with an empty side is skipped; the match ends only when
    /// neither side can move.
    #[default]
    SkipEmptySide,
    /// The match ends as soon as either side is empty after a sequence;
    /// seeds left on the other side go to that side's store.
    CollectOnEmptySide,
}

/// Who drives the two race sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceMode {
    /// Each seed waits for that player's advance signal.
    Interactive,
    /// Sequences take turns one seed at a time, A first.
    #[default]
    Alternating,
    /// A seeded RNG picks which sequence moves next.
    Jittered,
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Seeds placed in each hole at the start of a match.
    pub seeds_per_hole: u32,

    /// Race resolution policy.
    pub tie_break: RaceTieBreak,

    /// End-of-match policy.
    pub end_rule: EndRule,

    /// Race driving mode.
    pub race_mode: RaceMode,

    /// Seed for the jittered race scheduler.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seeds_per_hole: DEFAULT_SEEDS_PER_HOLE,
            tie_break: RaceTieBreak::default(),
            end_rule: EndRule::default(),
            race_mode: RaceMode::default(),
            seed: 42,
        }
    }
}

impl MatchConfig {
    /// Create the standard configuration (7 seeds per hole).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set seeds per hole.
    #[must_use]
    pub fn with_seeds_per_hole(mut self, seeds: u32) -> Self {
        self.seeds_per_hole = seeds;
        self
    }

    /// Set the race tie-break policy.
    #[must_use]
    pub fn with_tie_break(mut self, tie_break: RaceTieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Set the end-of-match policy.
    #[must_use]
    pub fn with_end_rule(mut self, end_rule: EndRule) -> Self {
        self.end_rule = end_rule;
        self
    }

    /// Set the race driving mode.
    #[must_use]
    pub fn with_race_mode(mut self, race_mode: RaceMode) -> Self {
        self.race_mode = race_mode;
        self
    }

    /// Set the scheduler seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Seeds on the board for the whole match.
    #[must_use]
    pub fn total_seeds(&self) -> u32 {
        self.seeds_per_hole * (2 * HOLES_PER_SIDE as u32)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seeds_per_hole == 0 {
            return Err(ConfigError::Validation(
                "seeds_per_hole must be > 0".into(),
            ));
        }
        if self
            .seeds_per_hole
            .checked_mul(2 * HOLES_PER_SIDE as u32)
            .is_none()
        {
            return Err(ConfigError::Validation(
                "seeds_per_hole is too large for the board".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.seeds_per_hole, 7);
        assert_eq!(config.total_seeds(), 98);
        assert_eq!(config.tie_break, RaceTieBreak::StoreGainThenSide);
        assert_eq!(config.end_rule, EndRule::SkipEmptySide);
        assert_eq!(config.race_mode, RaceMode::Alternating);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = MatchConfig::new()
            .with_seeds_per_hole(4)
            .with_tie_break(RaceTieBreak::FirstToFinish)
            .with_end_rule(EndRule::CollectOnEmptySide)
            .with_race_mode(RaceMode::Jittered)
            .with_seed(7);

        assert_eq!(config.total_seeds(), 56);
        assert_eq!(config.tie_break, RaceTieBreak::FirstToFinish);
        assert_eq!(config.end_rule, EndRule::CollectOnEmptySide);
        assert_eq!(config.race_mode, RaceMode::Jittered);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_toml_partial_uses_defaults() {
        let config = MatchConfig::from_toml_str(
            r#"
            race_mode = "interactive"
            end_rule = "collect_on_empty_side"
            "#,
        )
        .unwrap();

        assert_eq!(config.seeds_per_hole, 7);
        assert_eq!(config.race_mode, RaceMode::Interactive);
        assert_eq!(config.end_rule, EndRule::CollectOnEmptySide);
    }

    #[test]
    fn test_toml_rejects_zero_seeds() {
        let err = MatchConfig::from_toml_str("seeds_per_hole = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_toml_rejects_unknown_variant() {
        let err = MatchConfig::from_toml_str(r#"tie_break = "coin_flip""#).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = MatchConfig::load(Path::new("/nonexistent/congkak.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_rejects_overflowing_seed_count() {
        let config = MatchConfig::new().with_seeds_per_hole(u32::MAX);
        assert!(config.validate().is_err());
    }
}
