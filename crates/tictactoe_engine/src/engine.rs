//! Round state machine: board, turn, history and outcome.

use crate::error::{EngineError, InvalidMove, UndoRefusal};
use crate::invariants::{EngineInvariants, InvariantSet};
use crate::rules::{check_winner, is_draw};
use crate::{Board, Cell, Mark, Position, RoundOutcome, UndoPolicy};
use tracing::{debug, info, instrument, warn};

/// Tic-tac-toe round engine.
///
/// Owns the board, the side to move, the move history and the current
/// outcome. `InProgress` accepts moves; `Win` and `Draw` are terminal until
/// [`reset`](Self::reset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEngine {
    board: Board,
    turn: Mark,
    history: Vec<Position>,
    outcome: RoundOutcome,
    policy: UndoPolicy,
}

impl BoardEngine {
    /// Creates an engine with an empty board and the default undo policy.
    #[instrument]
    pub fn new() -> Self {
        Self::with_policy(UndoPolicy::default())
    }

    /// Creates an engine with an empty board and the given undo policy.
    #[instrument]
    pub fn with_policy(policy: UndoPolicy) -> Self {
        Self {
            board: Board::new(),
            turn: Mark::X,
            history: Vec::new(),
            outcome: RoundOutcome::InProgress,
            policy,
        }
    }

    /// Replays `moves` from an empty board.
    ///
    /// Stops at the first rejected move and returns its error.
    #[instrument]
    pub fn replay(moves: &[usize]) -> Result<Self, EngineError> {
        let mut engine = Self::new();
        for &index in moves {
            engine.apply_move(index)?;
        }
        Ok(engine)
    }

    /// Clears the board, gives the move to X and forgets history.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.turn = Mark::X;
        self.history.clear();
        self.outcome = RoundOutcome::InProgress;
        debug!("Round reset");
    }

    /// Places the current turn's mark at `index` and returns the new outcome.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMove` if the round is over, `index` is not 0-8, or the
    /// cell is occupied. State is unchanged on error.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn apply_move(&mut self, index: usize) -> Result<RoundOutcome, EngineError> {
        if self.outcome.is_terminal() {
            return Err(InvalidMove::RoundOver.into());
        }
        let pos = Position::from_index(index).ok_or(InvalidMove::OutOfRange(index))?;
        if !self.board.is_empty(pos) {
            return Err(InvalidMove::Occupied(pos).into());
        }

        let mark = self.turn;
        self.board.set(pos, Cell::Occupied(mark));
        self.history.push(pos);
        debug!(%mark, position = %pos, ply = self.history.len(), "Move applied");

        self.outcome = if let Some((winner, line)) = check_winner(&self.board) {
            info!(%winner, %line, "Round won");
            RoundOutcome::Win { mark: winner, line }
        } else if is_draw(&self.board) {
            info!("Round drawn");
            RoundOutcome::Draw
        } else {
            self.turn = mark.opponent();
            RoundOutcome::InProgress
        };

        self.check_invariants();
        Ok(self.outcome)
    }

    /// Takes back the last move and returns the position freed.
    ///
    /// # Errors
    ///
    /// Returns `EmptyHistory` when there is nothing to undo, or when the round
    /// is over and the policy is [`UndoPolicy::InProgressOnly`].
    #[instrument(skip(self), fields(policy = ?self.policy))]
    pub fn undo(&mut self) -> Result<Position, EngineError> {
        if self.outcome.is_terminal() && self.policy == UndoPolicy::InProgressOnly {
            return Err(UndoRefusal::RoundOver.into());
        }
        let pos = self.history.last().copied().ok_or(UndoRefusal::NoMoves)?;
        let Some(mark) = self.board.get(pos).mark() else {
            warn!(position = %pos, "History entry points at an empty cell");
            return Err(UndoRefusal::NoMoves.into());
        };

        self.history.pop();
        self.board.set(pos, Cell::Empty);
        self.turn = mark;
        self.outcome = RoundOutcome::InProgress;
        debug!(%mark, position = %pos, "Move undone");

        self.check_invariants();
        Ok(pos)
    }

    /// Returns the mark due to move.
    ///
    /// After a terminal outcome this is the mark that made the final move.
    pub fn current_turn(&self) -> Mark {
        self.turn
    }

    /// Returns an immutable copy of the board.
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    /// Returns a reference to the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current outcome.
    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    /// Returns the positions played this round, oldest first.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Returns the undo policy.
    pub fn policy(&self) -> UndoPolicy {
        self.policy
    }

    /// Returns positions that would accept a move, empty once the round is over.
    pub fn valid_moves(&self) -> Vec<Position> {
        if self.outcome.is_terminal() {
            Vec::new()
        } else {
            self.board.empty_positions()
        }
    }

    fn check_invariants(&self) {
        if cfg!(debug_assertions)
            && let Err(violations) = EngineInvariants::check_all(self)
        {
            for violation in &violations {
                warn!(description = %violation.description, "Engine invariant violated");
            }
            debug_assert!(violations.is_empty(), "engine invariants violated");
        }
    }
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self::new()
    }
}
