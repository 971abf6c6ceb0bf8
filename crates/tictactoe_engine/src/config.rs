//! Game configuration handed to the engine's caller at startup.

use crate::error::ConfigError;
use crate::match_tracker::DEFAULT_MATCH_LENGTH;
use crate::{Difficulty, Mark};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Name used for X when none is given.
pub const DEFAULT_PLAYER_X: &str = "Player X";
/// Name used for O when none is given.
pub const DEFAULT_PLAYER_O: &str = "Player O";

/// Whether a finished round may be reopened by undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UndoPolicy {
    /// Undo only while the round is in progress.
    #[default]
    InProgressOnly,
    /// Undo may also take back the move that ended the round.
    AllowAfterRoundEnd,
}

/// Players, opponent and match settings for a session.
///
/// When `difficulty` is set, O is played by the AI.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Display name for X.
    #[serde(default = "default_player_x")]
    #[setters(into)]
    player_x: String,

    /// Display name for O.
    #[serde(default = "default_player_o")]
    #[setters(into)]
    player_o: String,

    /// AI difficulty for O; `None` means two human players.
    #[serde(default)]
    #[setters(strip_option)]
    difficulty: Option<Difficulty>,

    /// Rounds per match, draws included.
    #[serde(default = "default_match_length")]
    match_length: u32,

    /// Undo behaviour once a round has ended.
    #[serde(default)]
    undo_policy: UndoPolicy,
}

fn default_player_x() -> String {
    DEFAULT_PLAYER_X.to_string()
}

fn default_player_o() -> String {
    DEFAULT_PLAYER_O.to_string()
}

fn default_match_length() -> u32 {
    DEFAULT_MATCH_LENGTH
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_x: default_player_x(),
            player_o: default_player_o(),
            difficulty: None,
            match_length: default_match_length(),
            undo_policy: UndoPolicy::default(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            player_x = %config.player_x,
            player_o = %config.player_o,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validated()
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Checks limits and replaces blank names with defaults.
    #[instrument(skip(self))]
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.match_length == 0 {
            return Err(ConfigError::new("match_length must be at least 1"));
        }
        if self.player_x.trim().is_empty() {
            self.player_x = default_player_x();
        }
        if self.player_o.trim().is_empty() {
            self.player_o = default_player_o();
        }
        self.player_x = self.player_x.trim().to_string();
        self.player_o = self.player_o.trim().to_string();
        Ok(self)
    }

    /// Display name for `mark`.
    pub fn player_name(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.player_x,
            Mark::O => &self.player_o,
        }
    }

    /// True when `mark` is played by the AI.
    pub fn is_ai(&self, mark: Mark) -> bool {
        mark == Mark::O && self.difficulty.is_some()
    }
}
