//! Engine error types.

use crate::Position;
use derive_more::{Display, Error};
use tracing::instrument;

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InvalidMove {
    /// Index outside 0-8.
    #[display("index {} is out of range (must be 0-8)", _0)]
    OutOfRange(usize),
    /// Target cell already holds a mark.
    #[display("{} is already occupied", _0)]
    Occupied(Position),
    /// The round has ended and has not been reset.
    #[display("the round is already over")]
    RoundOver,
}

/// Why an undo was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum UndoRefusal {
    /// No moves since the last reset.
    #[display("no moves to undo")]
    NoMoves,
    /// The round ended and the undo policy forbids reopening it.
    #[display("the round is already over")]
    RoundOver,
}

/// Kinds of engine failure.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EngineErrorKind {
    /// A move was rejected.
    #[display("Invalid move: {}", _0)]
    InvalidMove(InvalidMove),
    /// Nothing to undo.
    #[display("Empty history: {}", _0)]
    EmptyHistory(UndoRefusal),
    /// The AI was asked to move on a full board.
    #[display("No legal move available")]
    NoLegalMove,
    /// An argument was outside the operation's domain.
    #[display("Invalid argument: {}", _0)]
    InvalidArgument(String),
}

/// Engine error with location tracking.
///
/// Every failed operation leaves engine state untouched.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct EngineError {
    /// What went wrong.
    pub kind: EngineErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EngineError {
    /// Creates a new engine error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: EngineErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &EngineErrorKind {
        &self.kind
    }
}

impl From<InvalidMove> for EngineError {
    #[track_caller]
    fn from(reason: InvalidMove) -> Self {
        Self::new(EngineErrorKind::InvalidMove(reason))
    }
}

impl From<UndoRefusal> for EngineError {
    #[track_caller]
    fn from(reason: UndoRefusal) -> Self {
        Self::new(EngineErrorKind::EmptyHistory(reason))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
