//! Context source trait and fetch product

use async_trait::async_trait;

use crate::error::FetchError;

/// Repository material assembled for the narration prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
    /// Filtered, capped file listing, one path per line.
    pub file_tree: String,
    /// Default branch name (used to build source links).
    pub default_branch: String,
    /// README text, capped; empty string when the repository has none.
    pub readme: String,
}

/// Source of repository context.
///
/// `credential` is an optional one-off access token that overrides any
/// token the implementation was configured with.
#[async_trait]
pub trait ContextSource: Send + Sync {
    async fn fetch_context(
        &self,
        owner: &str,
        name: &str,
        credential: Option<&str>,
    ) -> Result<RepoContext, FetchError>;
}
