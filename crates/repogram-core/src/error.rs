//! Domain-level error taxonomy for Repogram.

use repo_context::FetchError;

/// Repogram domain errors.
///
/// The repair engine deliberately has no entry here: it is total and
/// never fails. Narration failures are degraded to placeholder text by
/// the pipeline and do not surface as errors either.
#[derive(Debug, thiserror::Error)]
pub enum RepogramError {
    #[error("invalid repository reference: {0}")]
    InvalidInput(String),

    #[error("repository not found (or private and no valid token provided)")]
    NotFound,

    #[error("repository yielded no usable file listing")]
    EmptyResult,

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("store error: {0}")]
    Store(#[from] diagram_store::StoreError),
}

impl From<FetchError> for RepogramError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound => RepogramError::NotFound,
            FetchError::EmptyTree => RepogramError::EmptyResult,
            FetchError::Upstream { status } => {
                RepogramError::Upstream(format!("GitHub API error: {status}"))
            }
            FetchError::Transport(msg) => RepogramError::Upstream(msg),
        }
    }
}

/// Result type for Repogram domain operations.
pub type Result<T> = std::result::Result<T, RepogramError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_map_to_taxonomy() {
        assert!(matches!(
            RepogramError::from(FetchError::NotFound),
            RepogramError::NotFound
        ));
        assert!(matches!(
            RepogramError::from(FetchError::EmptyTree),
            RepogramError::EmptyResult
        ));

        let upstream = RepogramError::from(FetchError::Upstream { status: 502 });
        assert!(upstream.to_string().contains("502"));
    }

    #[test]
    fn invalid_input_display() {
        let err = RepogramError::InvalidInput("not-a-repo".to_string());
        assert!(err.to_string().contains("invalid repository reference"));
        assert!(err.to_string().contains("not-a-repo"));
    }
}
