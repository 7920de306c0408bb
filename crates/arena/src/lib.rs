//! LLM vs Engine Arena
//!
//! This crate provides infrastructure for:
//! - Playing games between a UCI engine (White) and a language model (Black)
//! - Running multi-game matches with a per-game turn limit
//! - Logging results and exporting replays for later analysis
//! - Estimating the model's playing strength against the engine's Elo
//!
//! # Usage
//!
//! ```bash
//! # Five games against Stockfish limited to 1350 Elo
//! cargo run -p arena -- play --engine-path /usr/games/stockfish --elo 1350 --games 5 \
//!     --log results/games.jsonl
//!
//! # Summarize everything logged so far
//! cargo run -p arena -- summary --log results/games.jsonl
//! ```

mod config;
mod elo;
mod game;
mod match_runner;
mod results;

#[cfg(test)]
mod test_support;

pub use config::*;
pub use elo::*;
pub use game::*;
pub use match_runner::*;
pub use results::*;
