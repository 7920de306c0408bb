//! Append-only move record and position snapshots for one game

use serde::{Deserialize, Serialize};
use shakmaty::Color;
use std::fmt;

use crate::board::AppliedMove;

/// One applied move. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Fullmove number the move was played on
    pub turn: u32,
    #[serde(with = "color_serde")]
    pub side: Color,
    /// Name of the agent that produced the move
    pub mover: String,
    pub uci: String,
    pub san: String,
    /// The model side gave up and a random legal move was played
    pub fallback: bool,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.turn, self.uci)
    }
}

/// Moves played plus every position reached.
///
/// `snapshots` starts with the initial FEN and gains one FEN per applied
/// move, so `snapshots.len() == records.len() + 1` always holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameHistory {
    records: Vec<MoveRecord>,
    snapshots: Vec<String>,
}

impl GameHistory {
    pub fn new(initial_fen: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            snapshots: vec![initial_fen.into()],
        }
    }

    /// Record an applied move together with the FEN it produced
    pub fn push(
        &mut self,
        turn: u32,
        side: Color,
        mover: &str,
        applied: AppliedMove,
        fallback: bool,
        fen_after: String,
    ) -> &MoveRecord {
        self.records.push(MoveRecord {
            turn,
            side,
            mover: mover.to_string(),
            uci: applied.uci,
            san: applied.san,
            fallback,
        });
        self.snapshots.push(fen_after);
        &self.records[self.records.len() - 1]
    }

    /// Forget everything and start over from `initial_fen`
    pub fn clear(&mut self, initial_fen: impl Into<String>) {
        self.records.clear();
        self.snapshots.clear();
        self.snapshots.push(initial_fen.into());
    }

    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    /// Every position of the game as FEN, initial position first
    pub fn snapshots(&self) -> &[String] {
        &self.snapshots
    }

    pub fn plies(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    /// Turn-indexed move texts, e.g. `["1. e2e4", "1. e7e5"]`
    pub fn move_texts(&self) -> Vec<String> {
        self.records.iter().map(ToString::to_string).collect()
    }

    pub fn fallback_count(&self) -> usize {
        self.records.iter().filter(|r| r.fallback).count()
    }
}

mod color_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use shakmaty::Color;

    pub fn serialize<S: Serializer>(color: &Color, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(crate::types::side_name(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Color, D::Error> {
        let name = String::deserialize(d)?;
        match name.as_str() {
            "White" | "white" | "w" => Ok(Color::White),
            "Black" | "black" | "b" => Ok(Color::Black),
            other => Err(serde::de::Error::custom(format!("unknown side {other:?}"))),
        }
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
