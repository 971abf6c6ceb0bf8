//! Headless harness for the tic-tac-toe engine.
//!
//! Parses move scripts, drives a [`Session`] through them and reports the
//! resulting outcomes, boards and scores.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod script;
mod session;

pub use cli::{Cli, Command, SessionArgs};
pub use script::{ScriptError, Step, parse_script};
pub use session::{GameEvent, RoundReport, Session};
