//! Command-line interface for the tic-tac-toe harness.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_engine::{ConfigError, Difficulty, GameConfig, UndoPolicy};
use tracing::instrument;

/// Headless tic-tac-toe - replay move scripts against the engine
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Headless tic-tac-toe harness", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a single round
    Play {
        /// Cells (0-8 or labels like `center`) separated by commas or spaces; `u` undoes
        moves: String,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Play a match, one round per --round
    Match {
        /// Move script for one round (repeatable)
        #[arg(long = "round", required = true)]
        rounds: Vec<String>,

        #[command(flatten)]
        session: SessionArgs,
    },
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Let the AI play O at this difficulty (easy, medium, hard or 1-3)
    #[arg(long, value_parser = parse_difficulty)]
    pub ai: Option<Difficulty>,

    /// Seed for the AI's random choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to a TOML game config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Name for X
    #[arg(long)]
    pub player_x: Option<String>,

    /// Name for O
    #[arg(long)]
    pub player_o: Option<String>,

    /// Rounds per match
    #[arg(long)]
    pub match_length: Option<u32>,

    /// Allow undo to reopen a finished round
    #[arg(long)]
    pub undo_after_round_end: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

impl SessionArgs {
    /// Loads the config file if given, then applies flag overrides.
    #[instrument(skip(self))]
    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(name) = &self.player_x {
            config = config.with_player_x(name.as_str());
        }
        if let Some(name) = &self.player_o {
            config = config.with_player_o(name.as_str());
        }
        if let Some(difficulty) = self.ai {
            config = config.with_difficulty(difficulty);
        }
        if let Some(length) = self.match_length {
            config = config.with_match_length(length);
        }
        if self.undo_after_round_end {
            config = config.with_undo_policy(UndoPolicy::AllowAfterRoundEnd);
        }
        config.validated()
    }
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::parse(s)
        .ok_or_else(|| format!("unknown difficulty '{}' (use easy, medium, hard or 1-3)", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_with_ai() {
        let cli =
            Cli::try_parse_from(["tictactoe", "play", "4,0", "--ai", "2", "--seed", "9"]).unwrap();
        let Command::Play { moves, session } = cli.command else {
            panic!("expected play");
        };
        assert_eq!(moves, "4,0");
        assert_eq!(session.ai, Some(Difficulty::Medium));
        assert_eq!(session.seed, Some(9));
    }

    #[test]
    fn test_parse_match_rounds() {
        let cli = Cli::try_parse_from([
            "tictactoe", "match", "--round", "0,3,1,4,2", "--round", "4 0 8", "--json",
        ])
        .unwrap();
        let Command::Match { rounds, session } = cli.command else {
            panic!("expected match");
        };
        assert_eq!(rounds, vec!["0,3,1,4,2", "4 0 8"]);
        assert!(session.json);
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        assert!(Cli::try_parse_from(["tictactoe", "play", "4", "--ai", "expert"]).is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = SessionArgs {
            player_x: Some("Ada".to_string()),
            match_length: Some(5),
            undo_after_round_end: true,
            ..SessionArgs::default()
        };
        let config = args.game_config().unwrap();
        assert_eq!(config.player_x(), "Ada");
        assert_eq!(config.player_o(), "Player O");
        assert_eq!(*config.match_length(), 5);
        assert_eq!(*config.undo_policy(), UndoPolicy::AllowAfterRoundEnd);
    }

    #[test]
    fn test_zero_match_length_flag_rejected() {
        let args = SessionArgs {
            match_length: Some(0),
            ..SessionArgs::default()
        };
        assert!(args.game_config().is_err());
    }
}
