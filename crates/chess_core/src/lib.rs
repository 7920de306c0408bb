pub mod board;
pub mod error;
pub mod history;
pub mod types;

pub use board::*;
pub use error::*;
pub use history::*;
pub use types::*;

// The rules library's colour type is part of our public API
pub use shakmaty::Color;

// =============================================================================
// Agent traits: implemented by everything that produces moves
// =============================================================================

/// Everything an agent may look at when choosing a move.
///
/// Built fresh by the game loop for every turn and passed by reference, so
/// agents carry no board state of their own between calls.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    /// Side the agent is choosing for
    pub side: Color,
    /// Number of moves already played in this game
    pub ply: usize,
    pub fen: &'a str,
    /// Human-readable board, see [`BoardState::diagram`]
    pub board: &'a str,
    /// Legal moves in UCI notation
    pub legal_moves: &'a [String],
    /// Turn-indexed history, see [`GameHistory::move_texts`]
    pub history: &'a [String],
}

/// A move chosen by a [`MoveSelector`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Move in UCI notation
    pub mv: String,
    /// Attempts spent before settling on the move
    pub attempts: u32,
    /// The selector gave up and picked a random legal move
    pub fallback: bool,
}

/// An external, strength-rated engine driven by position and search depth.
///
/// Errors are never retried: an engine that cannot answer ends the match.
pub trait EngineAgent {
    /// Returns the engine's name for logs and move records
    fn name(&self) -> &str;

    /// Limit playing strength to an Elo-like rating and fix the search depth
    fn configure(&mut self, strength: u32, depth: u8) -> AgentResult<()>;

    fn set_position(&mut self, fen: &str) -> AgentResult<()>;

    /// Best move for the position last given to [`EngineAgent::set_position`].
    ///
    /// The text is returned as the engine produced it; validating it is the
    /// caller's job.
    fn best_move(&mut self) -> AgentResult<String>;

    /// Reset internal state for a new game
    fn new_game(&mut self) -> AgentResult<()> {
        Ok(())
    }
}

/// A move source that always produces a legal move.
///
/// Implementors absorb their own failures (retries, fallbacks) so the game
/// loop never sees an error from this side.
pub trait MoveSelector {
    fn name(&self) -> &str;

    /// Choose one of `ctx.legal_moves`. `ctx.legal_moves` is never empty.
    fn select_move(&mut self, ctx: &TurnContext<'_>) -> Selection;

    /// Reset per-game bookkeeping
    fn new_game(&mut self) {}
}
