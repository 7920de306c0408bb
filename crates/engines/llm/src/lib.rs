//! Language-Model Move Agent
//!
//! Turns a free-text language model into a [`MoveSelector`] that always
//! returns a legal move:
//! - Builds a prompt from the turn context (FEN, board, legal moves, history)
//! - Parses the answer into a typed [`MoveAnalysis`]
//! - Retries on any failure, up to a fixed number of attempts
//! - Falls back to a uniformly random legal move when every attempt failed

pub mod error;
pub mod ollama;
pub mod prompt;
pub mod schema;

pub use error::*;
pub use ollama::{OllamaClient, OllamaConfig};
pub use prompt::{Message, Prompt, Role};
pub use schema::{normalize_move, CandidateMove, MoveAnalysis};

use chess_core::{MoveSelector, Selection, TurnContext};
use rand::rngs::StdRng;
use rand::SeedableRng;
use random_engine::choose_random_move;
use serde::Serialize;
use std::time::Duration;


/// Attempts per turn before falling back to a random move
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Pause before a fallback move so a failing backend is not hammered
pub const DEFAULT_FALLBACK_PAUSE: Duration = Duration::from_secs(5);

/// A text generator behind some transport.
///
/// Each call receives the complete prompt; implementations keep no game
/// state between calls.
pub trait LanguageModel {
    fn name(&self) -> &str;

    /// Raw model output for `prompt`
    fn generate(&mut self, prompt: &Prompt) -> Result<String, ModelError>;
}

impl<M: LanguageModel + ?Sized> LanguageModel for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn generate(&mut self, prompt: &Prompt) -> Result<String, ModelError> {
        (**self).generate(prompt)
    }
}

/// Retry and fallback policy
#[derive(Debug, Clone)]
pub struct ModelAgentConfig {
    pub max_attempts: u32,
    pub fallback_pause: Duration,
    /// Seed for the fallback RNG (None = entropy)
    pub seed: Option<u64>,
}

impl Default for ModelAgentConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            fallback_pause: DEFAULT_FALLBACK_PAUSE,
            seed: None,
        }
    }
}

/// What happened on one of the agent's turns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnLog {
    /// The model produced a legal move
    Analysis { attempts: u32, analysis: MoveAnalysis },
    /// Every attempt failed and a random move was played
    Fallback {
        attempts: u32,
        mv: String,
        last_error: String,
    },
}

/// Move selector backed by a language model
pub struct ModelAgent<M> {
    model: M,
    config: ModelAgentConfig,
    rng: StdRng,
    turns: Vec<TurnLog>,
}

impl<M: LanguageModel> ModelAgent<M> {
    pub fn new(model: M, config: ModelAgentConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        tracing::info!(model = model.name(), "model agent enters the game");
        Self {
            model,
            config,
            rng,
            turns: Vec::new(),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Per-turn record for the current game, oldest first
    pub fn turns(&self) -> &[TurnLog] {
        &self.turns
    }

    /// Turns in the current game that ended in a random move
    pub fn fallback_count(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| matches!(t, TurnLog::Fallback { .. }))
            .count()
    }

    /// One model call: generate, parse, validate against the legal moves
    fn attempt(
        &mut self,
        prompt: &Prompt,
        legal_moves: &[String],
    ) -> Result<(String, MoveAnalysis), AttemptError> {
        let raw = self.model.generate(prompt)?;
        tracing::debug!(response = %raw, "model answered");

        let analysis = MoveAnalysis::parse(&raw)?;
        let mv = normalize_move(&analysis.best_move.mv);
        if !legal_moves.contains(&mv) {
            return Err(AttemptError::IllegalMove(mv));
        }
        Ok((mv, analysis))
    }
}

impl<M: LanguageModel> MoveSelector for ModelAgent<M> {
    fn name(&self) -> &str {
        self.model.name()
    }

    fn select_move(&mut self, ctx: &TurnContext<'_>) -> Selection {
        let prompt = Prompt::for_turn(ctx);
        let max_attempts = self.config.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            match self.attempt(&prompt, ctx.legal_moves) {
                Ok((mv, analysis)) => {
                    tracing::info!(
                        ply = ctx.ply,
                        attempt,
                        mv = %mv,
                        rationale = %analysis.best_move.explanation,
                        "model chose a move"
                    );
                    self.turns.push(TurnLog::Analysis {
                        attempts: attempt,
                        analysis,
                    });
                    return Selection {
                        mv,
                        attempts: attempt,
                        fallback: false,
                    };
                }
                Err(err) => {
                    tracing::warn!(attempt, max_attempts, error = %err, "model attempt failed");
                    last_error = err.to_string();
                }
            }
        }

        tracing::warn!(
            ply = ctx.ply,
            "max attempts reached, selecting a random legal move"
        );
        if !self.config.fallback_pause.is_zero() {
            std::thread::sleep(self.config.fallback_pause);
        }

        // Callers guarantee a non-empty move list; an empty string fails to apply
        let mv = choose_random_move(ctx.legal_moves, &mut self.rng).unwrap_or_default();
        self.turns.push(TurnLog::Fallback {
            attempts: max_attempts,
            mv: mv.clone(),
            last_error,
        });
        Selection {
            mv,
            attempts: max_attempts,
            fallback: true,
        }
    }

    fn new_game(&mut self) {
        self.turns.clear();
    }
}
