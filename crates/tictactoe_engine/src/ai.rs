//! Computer opponent: random play or a one-ply win/block heuristic.
//!
//! The heuristic at Medium and Hard is not minimax. It takes an immediate
//! win, otherwise blocks an immediate loss, otherwise plays the first empty
//! cell in row-major order. A careful opponent can beat it with a fork.

use crate::error::{EngineError, EngineErrorKind};
use crate::rules::LINES;
use crate::{Board, Cell, Mark, Position};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// AI strength.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random empty cell.
    #[default]
    Easy,
    /// Win, else block, else first empty cell.
    Medium,
    /// Same heuristic as Medium.
    Hard,
}

impl Difficulty {
    /// Maps a 1-3 slider level to a difficulty.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Parses a name (case-insensitive) or a 1-3 level.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.parse::<u8>() {
            Ok(level) => Self::from_level(level),
            Err(_) => s.parse().ok(),
        }
    }
}

/// Returns the cell that completes a line for `mark`, if any.
///
/// Lines are scanned in [`LINES`] order. A line qualifies when two cells
/// hold `mark` and the third is empty.
#[instrument(skip(board))]
pub fn winning_move(board: &Board, mark: Mark) -> Option<Position> {
    LINES.iter().find_map(|line| {
        let positions = line.positions();
        let owned = positions
            .iter()
            .filter(|p| board.get(**p) == Cell::Occupied(mark))
            .count();
        let mut empty = positions.iter().filter(|p| board.is_empty(**p));
        match (owned, empty.next(), empty.next()) {
            (2, Some(pos), None) => Some(*pos),
            _ => None,
        }
    })
}

/// Win, else block, else first empty cell. `None` on a full board.
#[instrument(skip(board))]
pub fn heuristic_move(board: &Board, mark: Mark) -> Option<Position> {
    winning_move(board, mark)
        .or_else(|| winning_move(board, mark.opponent()))
        .or_else(|| Position::ALL.iter().copied().find(|p| board.is_empty(*p)))
}

/// Selects a move for the side due to move on `board`, drawing randomness from `rng`.
///
/// # Errors
///
/// Returns `NoLegalMove` if the board is full.
#[instrument(skip(board, rng))]
pub fn select_move_with<R: Rng + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Position, EngineError> {
    let mark = board.next_mark();
    let choice = match difficulty {
        Difficulty::Easy => board.empty_positions().choose(rng).copied(),
        Difficulty::Medium | Difficulty::Hard => heuristic_move(board, mark),
    };
    let pos = choice.ok_or_else(|| EngineError::new(EngineErrorKind::NoLegalMove))?;
    debug!(%mark, %difficulty, position = %pos, "AI chose position");
    Ok(pos)
}

/// AI move selector owning its random source.
#[derive(Debug, Clone)]
pub struct AiStrategy {
    rng: StdRng,
}

impl AiStrategy {
    /// Creates a strategy seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a strategy with a fixed seed, for reproducible Easy play.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Selects a move for the side due to move on `board`.
    ///
    /// # Errors
    ///
    /// Returns `NoLegalMove` if the board is full.
    pub fn select_move(
        &mut self,
        board: &Board,
        difficulty: Difficulty,
    ) -> Result<Position, EngineError> {
        select_move_with(board, difficulty, &mut self.rng)
    }
}

impl Default for AiStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("medium"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("1"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("4"), None);
        assert_eq!(Difficulty::parse("expert"), None);
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }

    #[test]
    fn test_takes_win_over_block() {
        // O to move: O has 3,4 (needs 5); X has 0,1 (threatens 2).
        let board = parse("XX. OO. X..");
        assert_eq!(board.next_mark(), Mark::O);
        assert_eq!(heuristic_move(&board, Mark::O), Some(Position::MiddleRight));
    }

    #[test]
    fn test_blocks_when_no_win() {
        let board = parse("XX. .O. ...");
        assert_eq!(heuristic_move(&board, Mark::O), Some(Position::TopRight));
    }

    #[test]
    fn test_falls_back_to_first_empty() {
        let board = parse("X.. ... ...");
        assert_eq!(heuristic_move(&board, Mark::O), Some(Position::TopCenter));
    }

    #[test]
    fn test_first_line_in_scan_order_wins_tie() {
        // X threatens both 2 (top row) and 6 (left column).
        let board = parse("XX. X.. .OO");
        assert_eq!(winning_move(&board, Mark::X), Some(Position::TopRight));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board = parse("XOX OXX OXO");
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let err = AiStrategy::seeded(7).select_move(&board, difficulty).unwrap_err();
            assert_eq!(err.kind(), &EngineErrorKind::NoLegalMove);
        }
    }

    #[test]
    fn test_easy_picks_empty_cells_reproducibly() {
        let board = parse("XO. .X. ..O");
        let empty = board.empty_positions();
        let first: Vec<_> = {
            let mut ai = AiStrategy::seeded(42);
            (0..20).map(|_| ai.select_move(&board, Difficulty::Easy).unwrap()).collect()
        };
        let second: Vec<_> = {
            let mut ai = AiStrategy::seeded(42);
            (0..20).map(|_| ai.select_move(&board, Difficulty::Easy).unwrap()).collect()
        };
        assert_eq!(first, second);
        assert!(first.iter().all(|p| empty.contains(p)));
    }

    #[test]
    fn test_easy_reaches_every_empty_cell() {
        let board = parse("XO. .X. ..O");
        let empty = board.empty_positions();
        assert_eq!(empty.len(), 5);

        let mut ai = AiStrategy::seeded(11);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..200 {
            let pos = ai.select_move(&board, Difficulty::Easy).unwrap();
            assert!(empty.contains(&pos));
            seen.insert(pos);
        }
        assert_eq!(seen.into_iter().collect::<Vec<_>>(), empty);
    }
}
