//! Arena CLI
//!
//! Play a language model against a UCI engine, summarize logged results and
//! step through replays.

use anyhow::{bail, Context, Result};
use arena::{generate_report, read_replay, ArenaConfig, MatchRunner, ResultsLog};
use chess_core::{BoardState, EngineAgent};
use clap::{Args, Parser, Subcommand};
use llm_engine::{ModelAgent, OllamaClient};
use random_engine::RandomEngine;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use uci_engine::UciEngine;

#[derive(Parser, Debug)]
#[command(name = "arena", about = "Language model vs chess engine matches", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a match: the engine has White, the model has Black
    Play(PlayArgs),
    /// Aggregate a results log
    Summary {
        /// JSON Lines results log
        #[arg(long)]
        log: PathBuf,
        /// Rate the model against this Elo instead of the logged one
        #[arg(long)]
        engine_elo: Option<u32>,
    },
    /// Print every position of a replay file
    Replay {
        /// File written by `play --replay-dir`
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// TOML settings file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// UCI engine binary, e.g. stockfish
    #[arg(long, conflicts_with = "random_engine")]
    engine_path: Option<PathBuf>,

    /// Play against random moves instead of a UCI engine
    #[arg(long)]
    random_engine: bool,

    /// Engine strength limit
    #[arg(long)]
    elo: Option<u32>,

    /// Engine search depth
    #[arg(long)]
    depth: Option<u8>,

    /// Model name as known to the Ollama server
    #[arg(long)]
    model: Option<String>,

    #[arg(long)]
    ollama_url: Option<String>,

    #[arg(long)]
    temperature: Option<f32>,

    #[arg(long)]
    games: Option<u32>,

    /// Plies per game before it is stopped unfinished
    #[arg(long)]
    max_plies: Option<usize>,

    /// Append finished games to this JSON Lines file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Write one FEN-per-line replay per game here
    #[arg(long)]
    replay_dir: Option<PathBuf>,

    /// Seed for fallback and random-engine moves
    #[arg(long)]
    seed: Option<u64>,

    /// Only print the final summary
    #[arg(long, short)]
    quiet: bool,
}

impl PlayArgs {
    fn apply(&self, config: &mut ArenaConfig) {
        if let Some(path) = &self.engine_path {
            config.engine.path = Some(path.clone());
        }
        if self.random_engine {
            config.engine.path = None;
        }
        if let Some(elo) = self.elo {
            config.engine.elo = elo;
        }
        if let Some(depth) = self.depth {
            config.engine.depth = depth;
        }
        if let Some(model) = &self.model {
            config.model.name = model.clone();
        }
        if let Some(url) = &self.ollama_url {
            config.model.base_url = url.clone();
        }
        if let Some(t) = self.temperature {
            config.model.temperature = t;
        }
        if let Some(seed) = self.seed {
            config.model.seed = Some(seed);
        }
        if let Some(games) = self.games {
            config.game.games = games;
        }
        if let Some(max_plies) = self.max_plies {
            config.game.max_plies = max_plies;
        }
        if let Some(log) = &self.log {
            config.game.log_path = Some(log.clone());
        }
        if let Some(dir) = &self.replay_dir {
            config.game.replay_dir = Some(dir.clone());
        }
        if self.quiet {
            config.game.verbose = false;
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match Cli::parse().command {
        Command::Play(args) => play(&args),
        Command::Summary { log, engine_elo } => summary(&log, engine_elo),
        Command::Replay { file } => replay(&file),
    }
}

fn play(args: &PlayArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    let mut engine: Box<dyn EngineAgent> = match config.uci_engine() {
        Some(uci) => Box::new(
            UciEngine::start(&uci)
                .with_context(|| format!("starting engine {}", uci.path.display()))?,
        ),
        None => {
            if !args.random_engine {
                tracing::warn!("no engine path configured, playing against random moves");
            }
            Box::new(match config.model.seed {
                Some(seed) => RandomEngine::with_seed(seed),
                None => RandomEngine::new(),
            })
        }
    };

    let client = OllamaClient::new(config.ollama()).context("creating model client")?;
    let mut model = ModelAgent::new(client, config.model_agent());

    let match_config = config.match_config();
    let runner = MatchRunner::new(match_config.clone());

    println!(
        "=== {} ({} Elo, depth {}) vs {} ===",
        engine.name(),
        match_config.engine_elo,
        match_config.engine_depth,
        config.model.name
    );
    println!("Games: {}, turn limit: {} plies", match_config.games, match_config.max_plies);
    println!();

    let summary = runner.run_match(engine.as_mut(), &mut model)?;

    let result = &summary.result;
    println!();
    println!("=== Final Result ===");
    println!(
        "{}: {} wins, {} losses, {} draws, {} unfinished",
        config.model.name, result.wins, result.losses, result.draws, result.unfinished
    );
    println!("Fallback moves: {}", summary.fallback_count());
    match summary.performance_rating(match_config.engine_elo) {
        Some(rating) => println!("Performance rating: {rating:.0}"),
        None => println!("Performance rating: n/a (no decided games)"),
    }
    Ok(())
}

fn summary(log: &Path, engine_elo: Option<u32>) -> Result<()> {
    let entries = ResultsLog::new(log).load()?;
    print!("{}", generate_report(&entries, engine_elo));
    Ok(())
}

fn replay(file: &Path) -> Result<()> {
    let mut last = None;
    for (ply, fen) in read_replay(file)?.iter().enumerate() {
        let board = match BoardState::from_fen(fen) {
            Ok(board) => board,
            Err(e) => bail!("{}:{}: {e}", file.display(), ply + 1),
        };
        println!("Ply {ply}: {fen}");
        println!("{}", board.diagram());
        last = Some(board);
    }
    if let Some(board) = last {
        println!("Result: {}", board.outcome());
    }
    Ok(())
}
