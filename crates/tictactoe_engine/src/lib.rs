//! Framework-free tic-tac-toe game engine.
//!
//! # Architecture
//!
//! - **BoardEngine**: board, turn, move history, win/draw detection, undo
//! - **AiStrategy**: random or win/block heuristic move selection
//! - **MatchTracker**: best-of-N scoring across rounds
//! - **GameConfig**: player names, AI difficulty, match length, undo policy
//!
//! A UI layer drives these call by call and renders [`BoardEngine::snapshot`]
//! and [`MatchTracker::scores`] after every change.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{BoardEngine, Mark, MatchTracker, RoundOutcome};
//!
//! # fn example() -> Result<(), tictactoe_engine::EngineError> {
//! let mut engine = BoardEngine::new();
//! let mut tracker = MatchTracker::default();
//!
//! let mut outcome = RoundOutcome::InProgress;
//! for index in [0, 3, 1, 4, 2] {
//!     outcome = engine.apply_move(index)?;
//! }
//! assert_eq!(outcome.winner(), Some(Mark::X));
//!
//! let match_over = tracker.record_round(&outcome)?;
//! assert!(!match_over);
//! assert_eq!(*tracker.scores().x_wins(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ai;
mod config;
mod engine;
mod error;
pub mod invariants;
mod match_tracker;
mod outcome;
mod position;
pub mod rules;
mod types;

pub use ai::{AiStrategy, Difficulty, heuristic_move, select_move_with, winning_move};
pub use config::{DEFAULT_PLAYER_O, DEFAULT_PLAYER_X, GameConfig, UndoPolicy};
pub use engine::BoardEngine;
pub use error::{ConfigError, EngineError, EngineErrorKind, InvalidMove, UndoRefusal};
pub use match_tracker::{DEFAULT_MATCH_LENGTH, MatchScore, MatchTracker};
pub use outcome::RoundOutcome;
pub use position::Position;
pub use rules::{LINES, Line};
pub use types::{Board, Cell, Mark};
