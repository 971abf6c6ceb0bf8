//! Mark balance invariant: X leads O by zero or one.

use super::Invariant;
use crate::{Board, BoardEngine, Mark};

/// Invariant: X count minus O count is 0 or 1.
///
/// X moves first and turns alternate, so O can never be ahead.
pub struct MarkBalanceInvariant;

impl MarkBalanceInvariant {
    /// Checks the balance on a bare board.
    pub fn holds_for(board: &Board) -> bool {
        let x = board.count(Mark::X);
        let o = board.count(Mark::O);
        x == o || x == o + 1
    }
}

impl Invariant<BoardEngine> for MarkBalanceInvariant {
    fn holds(engine: &BoardEngine) -> bool {
        Self::holds_for(engine.board())
    }

    fn description() -> &'static str {
        "X count equals O count or exceeds it by one"
    }
}
