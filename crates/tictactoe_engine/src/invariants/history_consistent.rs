//! History consistency invariant: history matches occupied cells.

use super::Invariant;
use crate::{BoardEngine, Cell};
use std::collections::HashSet;

/// Invariant: history holds exactly the occupied cells, each once.
///
/// Every move in history corresponds to exactly one occupied cell.
/// No moves are missing, no cells are filled without a move.
pub struct HistoryConsistentInvariant;

impl Invariant<BoardEngine> for HistoryConsistentInvariant {
    fn holds(engine: &BoardEngine) -> bool {
        let history = engine.history();
        let distinct: HashSet<_> = history.iter().collect();

        distinct.len() == history.len()
            && history.len() == engine.board().occupied()
            && history
                .iter()
                .all(|pos| engine.board().get(*pos) != Cell::Empty)
    }

    fn description() -> &'static str {
        "History matches the set of occupied cells"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_engine_holds() {
        assert!(HistoryConsistentInvariant::holds(&BoardEngine::new()));
    }

    #[test]
    fn test_holds_after_moves() {
        let engine = BoardEngine::replay(&[0, 4, 8, 2]).unwrap();
        assert!(HistoryConsistentInvariant::holds(&engine));
        assert_eq!(engine.history().len(), 4);
    }
}
