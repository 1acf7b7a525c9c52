//! Error types for llm-narrator

use thiserror::Error;

/// Errors that can occur while requesting a completion
#[derive(Error, Debug)]
pub enum NarrationError {
    /// The completions endpoint returned a non-success status
    #[error("Completion endpoint error: {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The model returned no usable text
    #[error("Model returned empty completion")]
    EmptyCompletion,

    /// Network-level failure (includes request timeout)
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for NarrationError {
    fn from(err: reqwest::Error) -> Self {
        NarrationError::Transport(err.to_string())
    }
}
