//! Error types for repo-context

use thiserror::Error;

/// Errors that can occur while fetching repository context
#[derive(Error, Debug)]
pub enum FetchError {
    /// Repository does not exist or is not accessible with the given
    /// credential
    #[error("Repository not found (or private and no valid token provided)")]
    NotFound,

    /// The source-hosting API returned a non-success status
    #[error("GitHub API error: {status}")]
    Upstream { status: u16 },

    /// The tree response carried no file listing
    #[error("Repository tree is empty")]
    EmptyTree,

    /// Network-level failure
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}
