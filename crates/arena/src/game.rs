//! The game loop: engine (White) against model (Black) on one board
//!
//! States are `WhiteToMove`, `BlackToMove` and the absorbing `Terminated`.
//! Every move is validated by the board before it is recorded.

use chess_core::{
    side_name, AgentError, AppliedMove, BoardError, BoardState, Color, EndReason, EngineAgent,
    GameHistory, GameOutcome, MoveSelector, TurnContext,
};
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Why a game stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// The position is over by the rules
    Finished {
        outcome: GameOutcome,
        reason: EndReason,
    },
    /// The engine's move text could not be applied
    EngineIllegalMove { mv: String, reason: String },
    /// The ply budget ran out before the game ended
    TurnLimitReached,
}

impl Termination {
    /// Game result; `InProgress` unless the rules ended the game
    pub fn outcome(&self) -> GameOutcome {
        match self {
            Termination::Finished { outcome, .. } => *outcome,
            Termination::EngineIllegalMove { .. } | Termination::TurnLimitReached => {
                GameOutcome::InProgress
            }
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Finished { outcome, reason } => write!(f, "{outcome} by {reason}"),
            Termination::EngineIllegalMove { mv, reason } => {
                write!(f, "engine played {mv:?} which was rejected ({reason})")
            }
            Termination::TurnLimitReached => write!(f, "turn limit reached"),
        }
    }
}

/// Errors that abort a game instead of ending it
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("engine failed: {0}")]
    EngineUnavailable(#[from] AgentError),

    /// The model side returned a move the board rejected
    #[error("model agent returned {mv:?} which could not be applied: {source}")]
    ContractViolation {
        mv: String,
        #[source]
        source: BoardError,
    },

    #[error(transparent)]
    Log(#[from] crate::results::LogError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    WhiteToMove,
    BlackToMove,
    Terminated(Termination),
}

/// Everything known about a finished game
#[derive(Debug, Clone)]
pub struct GameReport {
    pub termination: Termination,
    pub outcome: GameOutcome,
    pub winner: Option<Color>,
    pub white: String,
    pub black: String,
    pub final_fen: String,
    pub history: GameHistory,
    pub fallback_count: usize,
    pub plies: usize,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

pub struct GameLoop<'a> {
    engine: &'a mut dyn EngineAgent,
    model: &'a mut dyn MoveSelector,
    board: BoardState,
    history: GameHistory,
    state: LoopState,
    max_plies: usize,
    verbose: bool,
}

impl<'a> GameLoop<'a> {
    /// A game from the standard starting position
    pub fn new(
        engine: &'a mut dyn EngineAgent,
        model: &'a mut dyn MoveSelector,
        max_plies: usize,
    ) -> Self {
        Self::with_board(engine, model, BoardState::new(), max_plies)
    }

    /// A game from an arbitrary position.
    ///
    /// The first mover follows the position's side to move; a position that
    /// is already over starts out terminated.
    pub fn with_board(
        engine: &'a mut dyn EngineAgent,
        model: &'a mut dyn MoveSelector,
        board: BoardState,
        max_plies: usize,
    ) -> Self {
        let history = GameHistory::new(board.fen());
        let state = Self::state_after(&board);
        Self {
            engine,
            model,
            board,
            history,
            state,
            max_plies,
            verbose: false,
        }
    }

    /// Print every move and the board as the game goes
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    /// Play one ply, or terminate on the turn limit.
    ///
    /// Does nothing once the game is terminated.
    pub fn step(&mut self) -> Result<&LoopState, MatchError> {
        let next = if matches!(self.state, LoopState::Terminated(_)) {
            return Ok(&self.state);
        } else if self.history.plies() >= self.max_plies {
            LoopState::Terminated(Termination::TurnLimitReached)
        } else if self.state == LoopState::WhiteToMove {
            self.engine_turn()?
        } else {
            self.model_turn()?
        };
        if let LoopState::Terminated(termination) = &next {
            tracing::info!(plies = self.history.plies(), "game over: {termination}");
        }
        self.state = next;
        Ok(&self.state)
    }

    /// Step until terminated and report
    pub fn run(mut self) -> Result<GameReport, MatchError> {
        let started_at = Utc::now();
        let clock = Instant::now();
        let termination = loop {
            if let LoopState::Terminated(termination) = self.step()? {
                break termination.clone();
            }
        };

        if self.verbose {
            println!("Final position:\n{}", self.board.diagram());
            println!("Moves: {}", self.history.move_texts().join(", "));
            println!("Result: {termination}");
        }

        let outcome = termination.outcome();
        Ok(GameReport {
            winner: outcome.winner(),
            outcome,
            termination,
            white: self.engine.name().to_string(),
            black: self.model.name().to_string(),
            final_fen: self.board.fen(),
            fallback_count: self.history.fallback_count(),
            plies: self.history.plies(),
            history: self.history,
            started_at,
            duration: clock.elapsed(),
        })
    }

    fn engine_turn(&mut self) -> Result<LoopState, MatchError> {
        let (side, turn) = (self.board.side_to_move(), self.board.fullmove_number());
        self.engine.set_position(&self.board.fen())?;
        let mv = match self.engine.best_move() {
            Ok(mv) => mv,
            Err(AgentError::Protocol(reply)) => {
                tracing::error!(engine = self.engine.name(), "unreadable engine reply: {reply}");
                return Ok(LoopState::Terminated(Termination::EngineIllegalMove {
                    mv: String::new(),
                    reason: reply,
                }));
            }
            Err(e) => return Err(e.into()),
        };

        match self.board.apply(&mv) {
            Ok(applied) => {
                let mover = self.engine.name().to_string();
                Ok(self.record(&mover, side, turn, applied, false))
            }
            Err(e) => {
                tracing::error!(
                    engine = self.engine.name(),
                    mv = %mv,
                    "engine move rejected: {e}"
                );
                Ok(LoopState::Terminated(Termination::EngineIllegalMove {
                    mv,
                    reason: e.to_string(),
                }))
            }
        }
    }

    fn model_turn(&mut self) -> Result<LoopState, MatchError> {
        let (side, turn) = (self.board.side_to_move(), self.board.fullmove_number());
        let fen = self.board.fen();
        let diagram = self.board.diagram();
        let legal_moves = self.board.legal_moves();
        let history = self.history.move_texts();
        let ctx = TurnContext {
            side,
            ply: self.history.plies(),
            fen: &fen,
            board: &diagram,
            legal_moves: &legal_moves,
            history: &history,
        };
        let selection = self.model.select_move(&ctx);

        match self.board.apply(&selection.mv) {
            Ok(applied) => {
                let mover = self.model.name().to_string();
                Ok(self.record(&mover, side, turn, applied, selection.fallback))
            }
            Err(source) => {
                tracing::error!(
                    model = self.model.name(),
                    mv = %selection.mv,
                    "model move rejected: {source}"
                );
                Err(MatchError::ContractViolation {
                    mv: selection.mv,
                    source,
                })
            }
        }
    }

    /// Append an applied move and work out the next state
    fn record(
        &mut self,
        mover: &str,
        side: Color,
        turn: u32,
        applied: AppliedMove,
        fallback: bool,
    ) -> LoopState {
        let ply = self.history.plies() + 1;
        let record = self
            .history
            .push(turn, side, mover, applied, fallback, self.board.fen());
        tracing::info!(
            ply,
            side = side_name(side),
            mover,
            uci = %record.uci,
            san = %record.san,
            fallback,
            "move applied"
        );
        if self.verbose {
            println!("{turn}. {mover} ({}) plays {}", side_name(side), record.san);
            println!("{}", self.board.diagram());
        }
        Self::state_after(&self.board)
    }

    fn state_after(board: &BoardState) -> LoopState {
        match board.status() {
            (true, outcome, Some(reason)) => {
                LoopState::Terminated(Termination::Finished { outcome, reason })
            }
            _ => match board.side_to_move() {
                Color::White => LoopState::WhiteToMove,
                Color::Black => LoopState::BlackToMove,
            },
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
