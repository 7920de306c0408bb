//! UCI Engine Agent
//!
//! Drives an external UCI engine (Stockfish or anything speaking the same
//! protocol) as an [`EngineAgent`]:
//! - `uci` / `uciok` handshake, collecting the engine's name and options
//! - strength limiting through `UCI_LimitStrength` and `UCI_Elo`
//! - fixed-depth searches with `go depth N`
//!
//! Every wait on the engine is bounded by the configured timeout.

pub mod process;
pub mod protocol;

pub use process::UciProcess;
pub use protocol::SpinOption;

use chess_core::{AgentError, AgentResult, EngineAgent};
use std::path::PathBuf;
use std::time::Duration;

/// Search depth used until [`EngineAgent::configure`] is called
pub const DEFAULT_DEPTH: u8 = 15;

/// How to launch the engine
#[derive(Debug, Clone)]
pub struct UciEngineConfig {
    pub path: PathBuf,
    pub args: Vec<String>,
    /// Bound on every single wait for an engine reply
    pub timeout: Duration,
}

impl UciEngineConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct UciEngine {
    process: UciProcess,
    name: String,
    options: Vec<SpinOption>,
    depth: u8,
}

impl UciEngine {
    /// Launch the engine and complete the handshake.
    ///
    /// Any failure here, including a timeout, means the engine is
    /// unavailable.
    pub fn start(config: &UciEngineConfig) -> AgentResult<Self> {
        let mut process = UciProcess::spawn(&config.path, &config.args, config.timeout)?;

        let mut name = None;
        let mut options = Vec::new();
        let handshake = process
            .send("uci")
            .and_then(|_| {
                process.read_until(|line| {
                    if let Some(id) = protocol::parse_id_name(line) {
                        name = Some(id.to_string());
                    } else if let Some(opt) = protocol::parse_spin_option(line) {
                        options.push(opt);
                    }
                    line.trim() == "uciok"
                })
            })
            .and_then(|_| process.sync());

        if let Err(e) = handshake {
            return Err(AgentError::Unavailable(format!(
                "{} did not complete the UCI handshake: {e}",
                config.path.display()
            )));
        }

        let name = name.unwrap_or_else(|| "UCI engine".to_string());
        tracing::info!(engine = %name, options = options.len(), "engine ready");

        Ok(Self {
            process,
            name,
            options,
            depth: DEFAULT_DEPTH,
        })
    }

    /// A spin option the engine advertised during the handshake
    pub fn spin_option(&self, name: &str) -> Option<&SpinOption> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl EngineAgent for UciEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn configure(&mut self, strength: u32, depth: u8) -> AgentResult<()> {
        self.depth = depth.max(1);

        match self.spin_option("UCI_Elo").cloned() {
            Some(option) => {
                let elo = option.clamp(i64::from(strength));
                if elo != i64::from(strength) {
                    tracing::warn!(
                        requested = strength,
                        applied = elo,
                        min = option.min,
                        max = option.max,
                        "requested Elo outside the engine's range"
                    );
                }
                self.process
                    .send(&protocol::set_option("UCI_LimitStrength", true))?;
                self.process.send(&protocol::set_option("UCI_Elo", elo))?;
                tracing::info!(engine = %self.name, elo, depth = self.depth, "strength configured");
            }
            None => {
                tracing::warn!(
                    engine = %self.name,
                    "engine has no UCI_Elo option, playing at full strength"
                );
            }
        }
        self.process.sync()
    }

    fn set_position(&mut self, fen: &str) -> AgentResult<()> {
        self.process.send(&format!("position fen {fen}"))
    }

    fn best_move(&mut self) -> AgentResult<String> {
        self.process.send(&format!("go depth {}", self.depth))?;
        let line = self
            .process
            .read_until(|line| line.starts_with("bestmove"))?;
        match protocol::parse_bestmove(&line) {
            Some(mv) => Ok(mv.to_string()),
            None => {
                // The board rejects the empty move and the game ends there
                tracing::warn!(engine = %self.name, "bestmove without a move: {line:?}");
                Ok(String::new())
            }
        }
    }

    fn new_game(&mut self) -> AgentResult<()> {
        self.process.send("ucinewgame")?;
        self.process.sync()
    }
}
