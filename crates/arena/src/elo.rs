//! Match scoring and rating estimates
//!
//! Results are kept from the model's point of view: the engine's Elo is the
//! known quantity and the model's strength is what we want to estimate.

use chess_core::{Color, GameOutcome};
use serde::{Deserialize, Serialize};

/// Scores are clamped to this margin before rating, so a perfect or zero
/// score still produces a finite number
pub const SCORE_MARGIN: f64 = 0.01;

/// Result of a single game for one side
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
    /// Stopped by the turn limit or an engine failure
    Unfinished,
}

impl GameResult {
    /// Result of `outcome` for the side playing `color`
    pub fn for_side(outcome: GameOutcome, color: Color) -> Self {
        match outcome {
            GameOutcome::InProgress => GameResult::Unfinished,
            GameOutcome::Draw => GameResult::Draw,
            decided if decided.winner() == Some(color) => GameResult::Win,
            _ => GameResult::Loss,
        }
    }
}

/// Result of a match (multiple games)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub unfinished: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::Unfinished => self.unfinished += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws + self.unfinished
    }

    /// Games that reached a result
    pub fn decided_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score over decided games (1 for win, 0.5 for draw, 0 for loss).
    ///
    /// `None` when no game reached a result.
    pub fn score(&self) -> Option<f64> {
        let decided = self.decided_games();
        if decided == 0 {
            return None;
        }
        Some((self.wins as f64 + 0.5 * self.draws as f64) / decided as f64)
    }

    /// Estimated rating against an opponent rated `opponent_elo`
    pub fn performance_rating(&self, opponent_elo: f64) -> Option<f64> {
        self.score()
            .map(|score| performance_rating(opponent_elo, score))
    }
}

/// Expected score of a player rated `rating` against `opponent`
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((opponent - rating) / 400.0))
}

/// Rating at which `score` is the expected result against `opponent_elo`
pub fn performance_rating(opponent_elo: f64, score: f64) -> f64 {
    let s = score.clamp(SCORE_MARGIN, 1.0 - SCORE_MARGIN);
    opponent_elo + 400.0 * (s / (1.0 - s)).log10()
}

#[cfg(test)]
#[path = "elo_tests.rs"]
mod elo_tests;
