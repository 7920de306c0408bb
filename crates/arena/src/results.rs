//! Results log and replay files
//!
//! The log is JSON Lines, one entry per finished game, and is only ever
//! appended to during a match. Replays are plain text with one FEN per line.

use chess_core::{Color, GameOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::elo::{performance_rating, GameResult, MatchResult};
use crate::game::GameReport;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: {source}")]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: replay has no positions")]
    EmptyReplay { path: PathBuf },
}

impl LogError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        LogError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// The engine side of a logged game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineInfo {
    pub name: String,
    pub elo: u32,
    pub depth: u8,
}

/// One line of the results log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLogEntry {
    pub timestamp: DateTime<Utc>,
    pub engine: EngineInfo,
    pub model: String,
    pub outcome: GameOutcome,
    /// Human-readable termination reason
    pub termination: String,
    pub moves: Vec<String>,
    pub plies: usize,
    pub fallback_moves: usize,
    pub final_fen: String,
    pub duration_secs: f64,
}

impl GameLogEntry {
    pub fn from_report(report: &GameReport, engine: EngineInfo) -> Self {
        Self {
            timestamp: report.started_at,
            engine,
            model: report.black.clone(),
            outcome: report.outcome,
            termination: report.termination.to_string(),
            moves: report.history.move_texts(),
            plies: report.plies,
            fallback_moves: report.fallback_count,
            final_fen: report.final_fen.clone(),
            duration_secs: report.duration.as_secs_f64(),
        }
    }

    /// Result from the model's point of view
    pub fn model_result(&self) -> GameResult {
        GameResult::for_side(self.outcome, Color::Black)
    }
}

/// Append-only JSON Lines file of finished games
#[derive(Debug, Clone)]
pub struct ResultsLog {
    path: PathBuf,
}

impl ResultsLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the file and its directory if needed
    pub fn append(&self, entry: &GameLogEntry) -> Result<(), LogError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| LogError::io(dir, e))?;
        }
        let line = serde_json::to_string(entry).map_err(|source| LogError::Json {
            path: self.path.clone(),
            line: 0,
            source,
        })?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| LogError::io(&self.path, e))?;
        writeln!(file, "{line}").map_err(|e| LogError::io(&self.path, e))
    }

    /// Every entry in the file, skipping blank lines
    pub fn load(&self) -> Result<Vec<GameLogEntry>, LogError> {
        let file = fs::File::open(&self.path).map_err(|e| LogError::io(&self.path, e))?;
        let mut entries = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| LogError::io(&self.path, e))?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|source| LogError::Json {
                path: self.path.clone(),
                line: idx + 1,
                source,
            })?;
            entries.push(entry);
        }
        Ok(entries)
    }
}

/// Aggregate of a results log
pub fn summarize(entries: &[GameLogEntry]) -> MatchResult {
    let mut result = MatchResult::new();
    for entry in entries {
        result.record(entry.model_result());
    }
    result
}

/// Text report over logged games.
///
/// The performance rating uses `engine_elo` when given, otherwise the Elo
/// recorded with each game (averaged).
pub fn generate_report(entries: &[GameLogEntry], engine_elo: Option<u32>) -> String {
    let mut report = String::new();
    report.push_str("=== LLM vs Engine Results ===\n\n");

    if entries.is_empty() {
        report.push_str("No games logged.\n");
        return report;
    }

    report.push_str(&format!(
        "{:<4} {:<20} {:<20} {:>7} {:>6} {:>9}  {}\n",
        "#", "Engine", "Model", "Result", "Plies", "Fallbacks", "Termination"
    ));
    report.push_str(&"-".repeat(100));
    report.push('\n');

    for (i, entry) in entries.iter().enumerate() {
        report.push_str(&format!(
            "{:<4} {:<20} {:<20} {:>7} {:>6} {:>9}  {}\n",
            i + 1,
            format!("{} ({})", entry.engine.name, entry.engine.elo),
            entry.model,
            entry.outcome.result_str(),
            entry.plies,
            entry.fallback_moves,
            entry.termination
        ));
    }

    let result = summarize(entries);
    let fallbacks: usize = entries.iter().map(|e| e.fallback_moves).sum();
    let model_plies: usize = entries.iter().map(|e| e.plies / 2).sum();

    report.push('\n');
    report.push_str(&format!(
        "Model: {} wins, {} losses, {} draws, {} unfinished\n",
        result.wins, result.losses, result.draws, result.unfinished
    ));
    report.push_str(&format!(
        "Fallback moves: {fallbacks} of {model_plies} model moves\n"
    ));

    let opponent = engine_elo.map(f64::from).unwrap_or_else(|| {
        entries.iter().map(|e| f64::from(e.engine.elo)).sum::<f64>() / entries.len() as f64
    });
    match result.score() {
        Some(score) => report.push_str(&format!(
            "Score: {:.1}% -> performance rating {:.0} (vs {:.0})\n",
            score * 100.0,
            performance_rating(opponent, score),
            opponent
        )),
        None => report.push_str("No decided games, no performance rating.\n"),
    }

    report
}

/// Write every position of a game to `<dir>/game-<n>.fen`
pub fn write_replay(dir: &Path, game: usize, snapshots: &[String]) -> Result<PathBuf, LogError> {
    fs::create_dir_all(dir).map_err(|e| LogError::io(dir, e))?;
    let path = dir.join(format!("game-{game}.fen"));
    let mut contents = snapshots.join("\n");
    contents.push('\n');
    fs::write(&path, contents).map_err(|e| LogError::io(&path, e))?;
    Ok(path)
}

/// Positions of a replay file, in order
pub fn read_replay(path: &Path) -> Result<Vec<String>, LogError> {
    let contents = fs::read_to_string(path).map_err(|e| LogError::io(path, e))?;
    let positions: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();
    if positions.is_empty() {
        return Err(LogError::EmptyReplay {
            path: path.to_path_buf(),
        });
    }
    Ok(positions)
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
