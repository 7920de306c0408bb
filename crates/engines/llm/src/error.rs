//! Error types for language-model calls and move-selection attempts

use std::time::Duration;
use thiserror::Error;

/// Failure of the language-model call itself
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model did not answer within {0:?}")]
    Timeout(Duration),

    #[error("model server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model returned an empty response")]
    EmptyResponse,
}

/// Why a single move-selection attempt was rejected.
///
/// Every variant consumes one attempt from the retry budget.
#[derive(Error, Debug)]
pub enum AttemptError {
    #[error("transport error: {0}")]
    Transport(#[from] ModelError),

    /// The response is not JSON at all
    #[error("unparseable response: {0}")]
    Parse(String),

    /// JSON, but not the shape we asked for
    #[error("response does not match schema: {0}")]
    Schema(String),

    /// Well-formed, but the chosen move is not in the legal-move list
    #[error("chosen move {0:?} is not legal")]
    IllegalMove(String),
}
