//! Drives the engine, AI and match tracker from move scripts.

use crate::script::Step;
use serde::Serialize;
use tictactoe_engine::{
    AiStrategy, Board, BoardEngine, Difficulty, EngineError, GameConfig, Mark, MatchScore,
    MatchTracker, Position, RoundOutcome,
};
use tracing::{debug, info, instrument, warn};

/// Something that happened during a session, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A mark was placed.
    MovePlaced {
        /// Who moved.
        player: String,
        /// Their mark.
        mark: Mark,
        /// Where.
        position: Position,
        /// Chosen by the AI.
        by_ai: bool,
    },
    /// A move was taken back.
    MoveUndone {
        /// Mark whose move was removed.
        mark: Mark,
        /// Freed cell.
        position: Position,
    },
    /// A round reached Win or Draw.
    RoundFinished {
        /// Final outcome.
        outcome: RoundOutcome,
        /// Winner's name, if any.
        winner: Option<String>,
    },
    /// The match reached its length.
    MatchFinished {
        /// Final counters.
        score: MatchScore,
        /// Name of the player with more wins, if any.
        leader: Option<String>,
    },
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::MovePlaced {
                player,
                mark,
                position,
                by_ai,
            } => {
                let who = if *by_ai { " (AI)" } else { "" };
                write!(
                    f,
                    "{}{} [{}] plays {} ({})",
                    player,
                    who,
                    mark,
                    position,
                    position.to_index()
                )
            }
            GameEvent::MoveUndone { mark, position } => {
                write!(f, "Undo: {} removed from {} ({})", mark, position, position.to_index())
            }
            GameEvent::RoundFinished { outcome, winner } => match winner {
                Some(name) => write!(f, "Round over: {} ({})", outcome, name),
                None => write!(f, "Round over: {}", outcome),
            },
            GameEvent::MatchFinished { score, leader } => {
                let result = leader.as_deref().unwrap_or("level");
                write!(f, "Match finished! {} - {}", score, result)
            }
        }
    }
}

/// Summary of a round after its script has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    /// Outcome after the last step.
    pub outcome: RoundOutcome,
    /// Final board.
    pub board: Board,
    /// Match counters after recording this round.
    pub score: MatchScore,
    /// True when this round completed the match.
    pub match_complete: bool,
    /// Events in order.
    pub events: Vec<GameEvent>,
}

/// One player-facing session: configuration, engine, AI and scores.
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    engine: BoardEngine,
    tracker: MatchTracker,
    ai: Option<(AiStrategy, Difficulty)>,
    events: Vec<GameEvent>,
}

impl Session {
    /// Creates a session; `seed` fixes the AI's random choices.
    #[instrument(skip(config))]
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let ai = config.difficulty().map(|difficulty| {
            let strategy = seed.map_or_else(AiStrategy::new, AiStrategy::seeded);
            (strategy, difficulty)
        });
        info!(
            player_x = %config.player_x(),
            player_o = %config.player_o(),
            ai = ?config.difficulty(),
            "Session created"
        );
        Self {
            engine: BoardEngine::with_policy(*config.undo_policy()),
            tracker: MatchTracker::new(*config.match_length()),
            config,
            ai,
            events: Vec::new(),
        }
    }

    /// Resets the board and runs `steps` as one round.
    ///
    /// A finished round is recorded in the match.
    ///
    /// # Errors
    ///
    /// Returns the first engine error; the round stops there.
    #[instrument(skip(self, steps), fields(steps = steps.len()))]
    pub fn play_round(&mut self, steps: &[Step]) -> Result<RoundReport, EngineError> {
        self.engine.reset();
        self.events.clear();
        for step in steps {
            match step {
                Step::Place(index) => self.place(*index)?,
                Step::Undo => self.undo()?,
            }
        }

        let outcome = self.engine.outcome();
        let match_complete = if outcome.is_terminal() {
            self.tracker.record_round(&outcome)?
        } else {
            debug!("Script ended before the round finished");
            false
        };
        if match_complete {
            self.events.push(GameEvent::MatchFinished {
                score: self.tracker.scores(),
                leader: self.leader_name(),
            });
        }

        Ok(RoundReport {
            outcome,
            board: self.engine.snapshot(),
            score: self.tracker.scores(),
            match_complete,
            events: std::mem::take(&mut self.events),
        })
    }

    /// Zeroes the match counters and clears the board.
    #[instrument(skip(self))]
    pub fn new_match(&mut self) {
        self.tracker.reset_match();
        self.engine.reset();
    }

    /// The configuration this session was built with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The round engine.
    pub fn engine(&self) -> &BoardEngine {
        &self.engine
    }

    /// The match tracker.
    pub fn tracker(&self) -> &MatchTracker {
        &self.tracker
    }

    fn place(&mut self, index: usize) -> Result<(), EngineError> {
        let mark = self.engine.current_turn();
        let outcome = self.engine.apply_move(index)?;
        self.push_placed(mark, false);
        self.after_move(outcome);
        self.ai_reply()
    }

    /// Plays for O while the AI is on move and the round is open.
    fn ai_reply(&mut self) -> Result<(), EngineError> {
        while let Some((strategy, difficulty)) = self.ai.as_mut()
            && !self.engine.outcome().is_terminal()
            && self.config.is_ai(self.engine.current_turn())
        {
            let mark = self.engine.current_turn();
            let pos = strategy.select_move(self.engine.board(), *difficulty)?;
            let outcome = self.engine.apply_move(pos.to_index())?;
            self.push_placed(mark, true);
            self.after_move(outcome);
        }
        Ok(())
    }

    /// With an AI opponent an undo takes back the AI reply and the human move before it.
    fn undo(&mut self) -> Result<(), EngineError> {
        let position = self.engine.undo()?;
        let mark = self.engine.current_turn();
        self.events.push(GameEvent::MoveUndone { mark, position });

        if self.config.is_ai(mark) && !self.engine.history().is_empty() {
            let position = self.engine.undo()?;
            let mark = self.engine.current_turn();
            self.events.push(GameEvent::MoveUndone { mark, position });
        }
        Ok(())
    }

    fn after_move(&mut self, outcome: RoundOutcome) {
        if outcome.is_terminal() {
            let winner = outcome
                .winner()
                .map(|mark| self.config.player_name(mark).to_string());
            self.events.push(GameEvent::RoundFinished { outcome, winner });
        }
    }

    fn push_placed(&mut self, mark: Mark, by_ai: bool) {
        let Some(position) = self.engine.history().last().copied() else {
            warn!(%mark, "Placed move missing from history");
            return;
        };
        self.events.push(GameEvent::MovePlaced {
            player: self.config.player_name(mark).to_string(),
            mark,
            position,
            by_ai,
        });
    }

    fn leader_name(&self) -> Option<String> {
        self.tracker
            .leader()
            .map(|mark| self.config.player_name(mark).to_string())
    }
}
