//! Match settings loaded from TOML
//!
//! ```toml
//! [engine]
//! path = "/usr/local/bin/stockfish"
//! elo = 1350
//!
//! [model]
//! name = "phi3:3.8b"
//!
//! [game]
//! games = 5
//! log_path = "results/games.jsonl"
//! ```
//!
//! Every field is optional.

use llm_engine::{ModelAgentConfig, OllamaConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use uci_engine::UciEngineConfig;

use crate::match_runner::MatchConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub engine: EngineSettings,
    pub model: ModelSettings,
    pub game: GameSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// UCI engine binary; `None` plays against the random engine
    pub path: Option<PathBuf>,
    pub elo: u32,
    pub depth: u8,
    pub move_timeout_secs: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            path: None,
            elo: 1000,
            depth: 15,
            move_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub base_url: String,
    pub name: String,
    pub temperature: f32,
    pub max_attempts: u32,
    pub request_timeout_secs: u64,
    pub fallback_pause_ms: u64,
    pub seed: Option<u64>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            base_url: llm_engine::ollama::DEFAULT_BASE_URL.to_string(),
            name: "phi3:3.8b".to_string(),
            temperature: 0.9,
            max_attempts: llm_engine::DEFAULT_MAX_ATTEMPTS,
            request_timeout_secs: 120,
            fallback_pause_ms: 5000,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub games: u32,
    pub max_plies: usize,
    pub log_path: Option<PathBuf>,
    pub replay_dir: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            games: 1,
            max_plies: 100,
            log_path: None,
            replay_dir: None,
            verbose: true,
        }
    }
}

impl ArenaConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reject settings no match could run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.games == 0 {
            return Err(ConfigError::Invalid("game.games must be at least 1".into()));
        }
        if self.game.max_plies == 0 {
            return Err(ConfigError::Invalid("game.max_plies must be at least 1".into()));
        }
        if self.model.max_attempts == 0 {
            return Err(ConfigError::Invalid("model.max_attempts must be at least 1".into()));
        }
        if self.engine.depth == 0 {
            return Err(ConfigError::Invalid("engine.depth must be at least 1".into()));
        }
        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(ConfigError::Invalid(format!(
                "model.temperature {} is outside 0.0..=2.0",
                self.model.temperature
            )));
        }
        Ok(())
    }

    /// UCI launch settings, when an engine path is configured
    pub fn uci_engine(&self) -> Option<UciEngineConfig> {
        let path = self.engine.path.as_ref()?;
        Some(UciEngineConfig {
            timeout: Duration::from_secs(self.engine.move_timeout_secs),
            ..UciEngineConfig::new(path)
        })
    }

    pub fn ollama(&self) -> OllamaConfig {
        OllamaConfig {
            base_url: self.model.base_url.clone(),
            model: self.model.name.clone(),
            temperature: self.model.temperature,
            timeout: Duration::from_secs(self.model.request_timeout_secs),
        }
    }

    pub fn model_agent(&self) -> ModelAgentConfig {
        ModelAgentConfig {
            max_attempts: self.model.max_attempts,
            fallback_pause: Duration::from_millis(self.model.fallback_pause_ms),
            seed: self.model.seed,
        }
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            games: self.game.games,
            max_plies: self.game.max_plies,
            engine_elo: self.engine.elo,
            engine_depth: self.engine.depth,
            verbose: self.game.verbose,
            log_path: self.game.log_path.clone(),
            replay_dir: self.game.replay_dir.clone(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
