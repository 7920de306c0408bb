//! Error taxonomy shared by the board and the agents

use std::time::Duration;
use thiserror::Error;

/// Errors produced by [`crate::BoardState`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The text is neither UCI nor SAN
    #[error("invalid move format: {0:?}")]
    InvalidFormat(String),

    /// The text parses but is not legal in the current position
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// A FEN string could not be turned into a legal position
    #[error("invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// Errors produced by an [`crate::EngineAgent`]
///
/// All but `Protocol` are fatal during a game: an engine that cannot answer
/// is not retried. A `Protocol` reply ends only the current game.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The engine could not be started or has gone away
    #[error("engine unavailable: {0}")]
    Unavailable(String),

    /// Reading from or writing to the engine failed
    #[error("engine I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The engine did not answer in time
    #[error("engine did not answer within {0:?}")]
    Timeout(Duration),

    /// The engine answered with something we could not understand
    #[error("engine protocol error: {0}")]
    Protocol(String),
}

/// Result type alias for agent operations
pub type AgentResult<T> = Result<T, AgentError>;
