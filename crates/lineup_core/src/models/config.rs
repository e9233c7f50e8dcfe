//! Game configuration: metadata, inning count, rule toggles, and numeric
//! limits. Metadata is passed through untouched; only the toggles and limits
//! feed the assignment engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LineupError, Result};

pub const DEFAULT_INNINGS: u8 = 6;

/// Hard ceiling on configurable game length. Anything above this is a
/// malformed configuration, not a long game.
const MAX_INNINGS: u8 = 12;

/// What to do with inactive players when building bench lists. They are
/// never fielded either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InactivePolicy {
    /// Leave inactive players out of the grid entirely, bench included.
    #[default]
    Hide,
    /// Keep inactive players visible on the bench.
    Bench,
}

/// Missing fields fall back to [`GameConfig::default`], so a partial
/// configuration record deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Game-day metadata, opaque to the engine.
    pub team_name: String,
    pub opponent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub field: String,
    pub is_home: bool,

    pub innings: u8,

    // Rule toggles.
    pub enforce_pitcher_rules: bool,
    pub avoid_back_to_back_bench: bool,
    pub balance_playing_time: bool,

    // Numeric limits.
    pub min_field_innings: u8,
    pub avoid_repeat_position_limit: u8,
    pub max_catcher_innings: u8,
    pub max_shortstop_innings: u8,
    pub max_first_base_innings: u8,

    pub inactive_policy: InactivePolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            team_name: "Your Team".to_string(),
            opponent: "Opponent".to_string(),
            date: None,
            field: "Home Field".to_string(),
            is_home: true,
            innings: DEFAULT_INNINGS,
            enforce_pitcher_rules: true,
            avoid_back_to_back_bench: true,
            balance_playing_time: true,
            min_field_innings: 3,
            avoid_repeat_position_limit: 2,
            max_catcher_innings: 4,
            max_shortstop_innings: 4,
            max_first_base_innings: 4,
            inactive_policy: InactivePolicy::Hide,
        }
    }
}

impl GameConfig {
    pub fn batting_first(&self) -> bool {
        self.is_home
    }

    pub fn batting_last(&self) -> bool {
        !self.is_home
    }

    pub fn validate(&self) -> Result<()> {
        if self.innings == 0 {
            return Err(LineupError::InvalidConfig("inning count must be at least 1".to_string()));
        }
        if self.innings > MAX_INNINGS {
            return Err(LineupError::InvalidConfig(format!(
                "inning count {} exceeds maximum {}",
                self.innings, MAX_INNINGS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.innings, 6);
        assert!(config.enforce_pitcher_rules);
        assert_eq!(config.min_field_innings, 3);
        assert_eq!(config.inactive_policy, InactivePolicy::Hide);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_json_fills_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"team_name":"Comets","enforce_pitcher_rules":false}"#).unwrap();
        assert_eq!(config.team_name, "Comets");
        assert!(!config.enforce_pitcher_rules);
        assert_eq!(config.innings, DEFAULT_INNINGS);
        assert_eq!(config.min_field_innings, 3);
    }

    #[test]
    fn test_home_team_bats_first() {
        let mut config = GameConfig::default();
        assert!(config.batting_first());
        config.is_home = false;
        assert!(config.batting_last());
    }

    #[test]
    fn test_validate_rejects_bad_inning_counts() {
        let mut config = GameConfig::default();
        config.innings = 0;
        assert!(config.validate().is_err());
        config.innings = 13;
        assert!(config.validate().is_err());
        config.innings = 9;
        assert!(config.validate().is_ok());
    }
}
