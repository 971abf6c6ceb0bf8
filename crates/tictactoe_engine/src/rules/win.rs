//! Win detection logic for tic-tac-toe.

use super::lines::{LINES, Line};
use crate::{Board, Cell, Mark};
use tracing::instrument;

/// Checks if there is a winner on the board.
///
/// Returns the mark and the first completed line in [`LINES`] order,
/// `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<(Mark, Line)> {
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.positions();
        match board.get(a) {
            Cell::Occupied(mark)
                if board.get(b) == board.get(a) && board.get(c) == board.get(a) =>
            {
                Some((mark, *line))
            }
            _ => None,
        }
    })
}
