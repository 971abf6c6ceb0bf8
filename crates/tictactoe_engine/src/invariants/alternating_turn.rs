//! Alternating turn invariant: marks alternate X, O, X, O, ...

use super::Invariant;
use crate::{BoardEngine, Cell, Mark};

/// Invariant: history alternates starting with X, and the turn is consistent.
///
/// While the round is open the side to move follows from the ply count.
/// Once it is over the turn stays with the mark that made the final move.
pub struct AlternatingTurnInvariant;

impl Invariant<BoardEngine> for AlternatingTurnInvariant {
    fn holds(engine: &BoardEngine) -> bool {
        let history = engine.history();
        let alternates = history.iter().enumerate().all(|(ply, pos)| {
            let expected = if ply % 2 == 0 { Mark::X } else { Mark::O };
            engine.board().get(*pos) == Cell::Occupied(expected)
        });
        if !alternates {
            return false;
        }

        let expected_turn = if engine.outcome().is_terminal() {
            if history.len() % 2 == 1 { Mark::X } else { Mark::O }
        } else if history.len() % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        };
        engine.current_turn() == expected_turn
    }

    fn description() -> &'static str {
        "Marks alternate (X, O, X, O, ...)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_engine_holds() {
        assert!(AlternatingTurnInvariant::holds(&BoardEngine::new()));
    }

    #[test]
    fn test_holds_after_o_wins() {
        // O completes the middle column.
        let engine = BoardEngine::replay(&[0, 4, 2, 1, 8, 7]).unwrap();
        assert_eq!(engine.outcome().winner(), Some(Mark::O));
        assert!(AlternatingTurnInvariant::holds(&engine));
        assert_eq!(engine.current_turn(), Mark::O);
    }
}
