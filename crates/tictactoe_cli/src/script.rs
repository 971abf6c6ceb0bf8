//! Move scripts: the harness's input language.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tictactoe_engine::Position;
use tracing::instrument;

/// One scripted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Place the current mark at a cell index. Not range-checked here.
    Place(usize),
    /// Take back the last move.
    Undo,
}

/// A token that is neither an index, a cell label nor `u`.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("unrecognised move '{}' (expected 0-8, a cell label or 'u')", token)]
pub struct ScriptError {
    /// The offending token.
    pub token: String,
}

/// Parses a script of comma- or whitespace-separated tokens.
///
/// Cells may be given as an index or a label such as `center` or
/// `top-left`. Indices are passed through unchecked so the engine reports
/// range errors.
#[instrument]
pub fn parse_script(script: &str) -> Result<Vec<Step>, ScriptError> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(parse_token)
        .collect()
}

fn parse_token(token: &str) -> Result<Step, ScriptError> {
    if matches!(token, "u" | "U" | "undo") {
        return Ok(Step::Undo);
    }
    if let Ok(index) = token.parse() {
        return Ok(Step::Place(index));
    }
    Position::from_label_or_number(token)
        .map(|pos| Step::Place(pos.to_index()))
        .ok_or_else(|| ScriptError {
            token: token.to_string(),
        })
}
