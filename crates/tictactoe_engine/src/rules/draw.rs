//! Draw detection logic for tic-tac-toe.

use super::win::check_winner;
use crate::Board;
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// A draw is a full board with no completed line.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    check_winner(board).is_none() && is_full(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Mark};

    fn parse(rows: &str) -> Board {
        let mut cells = [Cell::Empty; 9];
        for (i, ch) in rows.chars().filter(|c| !c.is_whitespace()).enumerate() {
            cells[i] = match ch {
                'X' => Cell::Occupied(Mark::X),
                'O' => Cell::Occupied(Mark::O),
                _ => Cell::Empty,
            };
        }
        Board::from_cells(cells)
    }

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
        assert!(!is_draw(&Board::new()));
    }

    #[test]
    fn test_draw_detection() {
        let board = parse("XOX OXX OXO");
        assert!(is_full(&board));
        assert!(is_draw(&board));
    }

    #[test]
    fn test_full_board_with_winner_is_not_draw() {
        let board = parse("XXX OOX XOO");
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_partial_board_not_draw() {
        let board = parse("XOX OX. ...");
        assert!(!is_draw(&board));
    }
}
