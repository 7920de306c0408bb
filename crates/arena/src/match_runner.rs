//! Match runner for playing a series of games between the engine and the model

use chess_core::{Color, EngineAgent, MoveSelector};
use std::path::PathBuf;

use crate::elo::{GameResult, MatchResult};
use crate::game::{GameLoop, GameReport, MatchError};
use crate::results::{write_replay, EngineInfo, GameLogEntry, ResultsLog};

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play
    pub games: u32,
    /// Plies per game before it is stopped unfinished
    pub max_plies: usize,
    /// Strength the engine is limited to
    pub engine_elo: u32,
    /// Search depth for the engine
    pub engine_depth: u8,
    /// Print every move and a line per game
    pub verbose: bool,
    /// Append each finished game here
    pub log_path: Option<PathBuf>,
    /// Write `game-<n>.fen` replays here
    pub replay_dir: Option<PathBuf>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 1,
            max_plies: 100,
            engine_elo: 1000,
            engine_depth: 15,
            verbose: true,
            log_path: None,
            replay_dir: None,
        }
    }
}

/// A completed match
#[derive(Debug, Clone)]
pub struct MatchSummary {
    /// Tally from the model's point of view
    pub result: MatchResult,
    pub games: Vec<GameReport>,
}

impl MatchSummary {
    /// Estimated model rating against the configured engine Elo
    pub fn performance_rating(&self, engine_elo: u32) -> Option<f64> {
        self.result.performance_rating(f64::from(engine_elo))
    }

    pub fn fallback_count(&self) -> usize {
        self.games.iter().map(|g| g.fallback_count).sum()
    }
}

/// Runs matches with the engine as White and the model as Black
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play `config.games` independent games.
    ///
    /// The engine is configured once; both agents start every game fresh.
    pub fn run_match(
        &self,
        engine: &mut dyn EngineAgent,
        model: &mut dyn MoveSelector,
    ) -> Result<MatchSummary, MatchError> {
        engine.configure(self.config.engine_elo, self.config.engine_depth)?;
        let log = self.config.log_path.as_ref().map(ResultsLog::new);

        tracing::info!(
            engine = engine.name(),
            model = model.name(),
            games = self.config.games,
            elo = self.config.engine_elo,
            depth = self.config.engine_depth,
            "match started"
        );

        let mut summary = MatchSummary {
            result: MatchResult::new(),
            games: Vec::new(),
        };

        for game_num in 1..=self.config.games {
            let report = self.play_game(engine, model)?;
            let game_result = GameResult::for_side(report.outcome, Color::Black);
            summary.result.record(game_result);

            if let Some(log) = &log {
                let engine_info = EngineInfo {
                    name: report.white.clone(),
                    elo: self.config.engine_elo,
                    depth: self.config.engine_depth,
                };
                log.append(&GameLogEntry::from_report(&report, engine_info))?;
            }
            if let Some(dir) = &self.config.replay_dir {
                let path = write_replay(dir, game_num as usize, report.history.snapshots())?;
                tracing::debug!(path = %path.display(), "replay written");
            }

            let r = &summary.result;
            tracing::info!(
                game = game_num,
                result = report.outcome.result_str(),
                plies = report.plies,
                fallbacks = report.fallback_count,
                "game finished: {}",
                report.termination
            );
            if self.config.verbose {
                println!(
                    "Game {}/{}: {} ({}) - Model score: {}-{}-{} ({} unfinished), fallbacks: {}",
                    game_num,
                    self.config.games,
                    report.outcome.result_str(),
                    report.termination,
                    r.wins,
                    r.losses,
                    r.draws,
                    r.unfinished,
                    report.fallback_count
                );
            }

            summary.games.push(report);
        }

        Ok(summary)
    }

    /// Play a single game from the starting position
    pub fn play_game(
        &self,
        engine: &mut dyn EngineAgent,
        model: &mut dyn MoveSelector,
    ) -> Result<GameReport, MatchError> {
        engine.new_game()?;
        model.new_game();
        GameLoop::new(engine, model, self.config.max_plies)
            .verbose(self.config.verbose)
            .run()
            .map_err(|e| {
                tracing::error!("game aborted: {e}");
                e
            })
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
