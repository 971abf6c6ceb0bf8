//! Round outcomes.

use crate::{Line, Mark};
use serde::{Deserialize, Serialize};

/// Result of the round after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Round is ongoing.
    #[default]
    InProgress,
    /// `mark` completed `line`.
    Win {
        /// The winning mark.
        mark: Mark,
        /// The completed line.
        line: Line,
    },
    /// Board full with no completed line.
    Draw,
}

impl RoundOutcome {
    /// True for `Win` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundOutcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            RoundOutcome::Win { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn line(&self) -> Option<Line> {
        match self {
            RoundOutcome::Win { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundOutcome::InProgress => write!(f, "In progress"),
            RoundOutcome::Win { mark, line } => write!(f, "{} wins on {}", mark, line),
            RoundOutcome::Draw => write!(f, "Draw"),
        }
    }
}
