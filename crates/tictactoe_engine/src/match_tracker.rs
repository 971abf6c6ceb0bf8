//! Best-of-N match scoring.

use crate::error::{EngineError, EngineErrorKind};
use crate::{Mark, RoundOutcome};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Default number of rounds in a match.
pub const DEFAULT_MATCH_LENGTH: u32 = 3;

/// Running win and draw counters for one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Getters, Serialize, Deserialize, new)]
pub struct MatchScore {
    /// Rounds won by X.
    x_wins: u32,
    /// Rounds won by O.
    o_wins: u32,
    /// Drawn rounds.
    draws: u32,
}

impl MatchScore {
    /// Total rounds recorded, draws included.
    pub fn rounds_played(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }

    /// Wins for `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        }
    }
}

impl std::fmt::Display for MatchScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "X: {}  O: {}  Draws: {}",
            self.x_wins, self.o_wins, self.draws
        )
    }
}

/// Aggregates round outcomes into a match.
///
/// The match ends after `match_length` rounds in total, draws included; it
/// is not first-to-majority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTracker {
    score: MatchScore,
    match_length: u32,
}

impl MatchTracker {
    /// Creates a tracker for a match of `match_length` rounds (at least one).
    #[instrument]
    pub fn new(match_length: u32) -> Self {
        Self {
            score: MatchScore::default(),
            match_length: match_length.max(1),
        }
    }

    /// Records a finished round and reports whether the match is complete.
    ///
    /// Rounds recorded past the match length still count and keep returning
    /// `true`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for [`RoundOutcome::InProgress`].
    #[instrument(skip(self), fields(rounds_played = self.score.rounds_played()))]
    pub fn record_round(&mut self, outcome: &RoundOutcome) -> Result<bool, EngineError> {
        match outcome {
            RoundOutcome::InProgress => {
                return Err(EngineError::new(EngineErrorKind::InvalidArgument(
                    "cannot record a round that is still in progress".to_string(),
                )));
            }
            RoundOutcome::Win { mark: Mark::X, .. } => self.score.x_wins += 1,
            RoundOutcome::Win { mark: Mark::O, .. } => self.score.o_wins += 1,
            RoundOutcome::Draw => self.score.draws += 1,
        }

        let complete = self.is_complete();
        if complete {
            info!(score = %self.score, leader = ?self.leader(), "Match complete");
        }
        Ok(complete)
    }

    /// Zeroes all counters.
    #[instrument(skip(self))]
    pub fn reset_match(&mut self) {
        self.score = MatchScore::default();
    }

    /// Returns the current counters.
    pub fn scores(&self) -> MatchScore {
        self.score
    }

    /// Total rounds recorded.
    pub fn rounds_played(&self) -> u32 {
        self.score.rounds_played()
    }

    /// Configured match length.
    pub fn match_length(&self) -> u32 {
        self.match_length
    }

    /// True once `match_length` rounds have been recorded.
    pub fn is_complete(&self) -> bool {
        self.rounds_played() >= self.match_length
    }

    /// The mark with more wins, `None` when level.
    pub fn leader(&self) -> Option<Mark> {
        match self.score.wins(Mark::X).cmp(&self.score.wins(Mark::O)) {
            std::cmp::Ordering::Greater => Some(Mark::X),
            std::cmp::Ordering::Less => Some(Mark::O),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl Default for MatchTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_LENGTH)
    }
}
