//! Random Move Agent
//!
//! Selects moves uniformly at random from all legal moves.
//! Useful for:
//! - The model agent's last-resort fallback when every attempt failed
//! - Baseline games when no external engine binary is installed
//! - Exercising the game loop end to end without any external process

use chess_core::{AgentError, AgentResult, BoardState, EngineAgent};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[cfg(test)]
mod lib_tests;

/// Pick one move uniformly at random. `None` only when `moves` is empty.
pub fn choose_random_move<R: Rng + ?Sized>(moves: &[String], rng: &mut R) -> Option<String> {
    moves.choose(rng).cloned()
}

/// An engine agent that plays random legal moves.
///
/// Strength and depth settings are accepted and ignored.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    board: Option<BoardState>,
    rng: StdRng,
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            board: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible move choices
    pub fn with_seed(seed: u64) -> Self {
        Self {
            board: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl EngineAgent for RandomEngine {
    fn name(&self) -> &str {
        "Random"
    }

    fn configure(&mut self, strength: u32, depth: u8) -> AgentResult<()> {
        tracing::debug!(strength, depth, "random engine ignores strength settings");
        Ok(())
    }

    fn set_position(&mut self, fen: &str) -> AgentResult<()> {
        let board =
            BoardState::from_fen(fen).map_err(|e| AgentError::Protocol(e.to_string()))?;
        self.board = Some(board);
        Ok(())
    }

    fn best_move(&mut self) -> AgentResult<String> {
        let board = self
            .board
            .as_ref()
            .ok_or_else(|| AgentError::Protocol("no position set".to_string()))?;
        // Like a UCI engine, report a null move when there is nothing to play
        Ok(choose_random_move(&board.legal_moves(), &mut self.rng)
            .unwrap_or_else(|| "0000".to_string()))
    }

    fn new_game(&mut self) -> AgentResult<()> {
        self.board = None;
        Ok(())
    }
}
