//! Repo-Context: GitHub Integration for Repogram
//!
//! Gathers the raw material the narration prompt is built from: the
//! repository file listing, its default branch, and its README text.
//!
//! ## Layer 2 - External Integration
//!
//! The fetcher is exposed behind the [`ContextSource`] trait so the
//! generation pipeline receives it as an injected collaborator and tests
//! can substitute a fake.

mod error;
mod github;
mod source;

pub use error::FetchError;
pub use github::GitHubContextSource;
pub use source::{ContextSource, RepoContext};

/// Result type for repo-context operations
pub type Result<T> = std::result::Result<T, FetchError>;
