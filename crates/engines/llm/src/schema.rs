//! Typed response schema for move selection
//!
//! Models answer in free text that is supposed to contain one JSON object:
//!
//! ```json
//! {
//!   "candidate_moves": [{"move": "e7e5", "explanation": "..."}],
//!   "best_move": {"move": "e7e5", "explanation": "..."}
//! }
//! ```
//!
//! Everything is validated here, before a move reaches game logic.

use serde::{Deserialize, Serialize};

use crate::error::AttemptError;

/// Upper bound on candidate moves in one answer
pub const MAX_CANDIDATES: usize = 5;

/// One move with the model's reasoning for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMove {
    #[serde(rename = "move")]
    pub mv: String,
    pub explanation: String,
}

/// A validated answer: 1 to 5 candidates and exactly one chosen move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveAnalysis {
    pub candidate_moves: Vec<CandidateMove>,
    pub best_move: CandidateMove,
}

#[derive(Deserialize)]
struct RawAnalysis {
    candidate_moves: Vec<CandidateMove>,
    best_move: OneOrMany,
}

// Models often wrap the single best move in a list
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(CandidateMove),
    Many(Vec<CandidateMove>),
}

impl MoveAnalysis {
    /// Parse and validate a raw model answer
    pub fn parse(raw: &str) -> Result<Self, AttemptError> {
        let json = extract_json_object(raw)
            .ok_or_else(|| AttemptError::Parse("no JSON object in response".to_string()))?;

        let parsed: RawAnalysis = serde_json::from_str(json).map_err(|e| {
            if e.is_data() {
                AttemptError::Schema(e.to_string())
            } else {
                AttemptError::Parse(e.to_string())
            }
        })?;

        let best_move = match parsed.best_move {
            OneOrMany::One(m) => m,
            OneOrMany::Many(mut list) => {
                if list.len() != 1 {
                    return Err(AttemptError::Schema(format!(
                        "expected exactly one best move, got {}",
                        list.len()
                    )));
                }
                list.remove(0)
            }
        };

        let count = parsed.candidate_moves.len();
        if count == 0 || count > MAX_CANDIDATES {
            return Err(AttemptError::Schema(format!(
                "expected 1 to {MAX_CANDIDATES} candidate moves, got {count}"
            )));
        }
        if best_move.mv.trim().is_empty() {
            return Err(AttemptError::Schema("best move is empty".to_string()));
        }

        Ok(Self {
            candidate_moves: parsed.candidate_moves,
            best_move,
        })
    }
}

/// The outermost `{ ... }` span of `raw`, skipping prose and code fences
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

/// Canonical UCI text: lowercase, separators (`-`, `x`, `:`, `=`, whitespace) removed
pub fn normalize_move(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '-' | 'x' | ':' | '=') && !c.is_whitespace())
        .collect()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod schema_tests;
