//! Storage trait for the diagram cache
//!
//! One diagram text is persisted per `(repo, kind)` pair. The trait is
//! async and backend-agnostic; an in-memory fake is provided for testing
//! via the `fakes` module.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Result type for cache operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A cached diagram, unique per `(repo, kind)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Normalized lowercase `owner/name` repository identifier.
    pub repo: String,
    /// Diagram kind token (e.g. "flowchart", "class").
    pub kind: String,
    /// Cleaned Mermaid source.
    pub diagram: String,
    /// Creation or last-refresh time.
    pub created_at: DateTime<Utc>,
}

/// Diagram cache store.
///
/// Guarantees:
/// - `(repo, kind)` is unique; `upsert` updates an existing entry in place
///   and refreshes its `created_at`.
/// - Entries are never deleted by this subsystem.
/// - Concurrent upserts for the same key are last-writer-wins.
#[async_trait]
pub trait DiagramCache: Send + Sync {
    /// Look up the cached diagram for `(repo, kind)`, if any.
    async fn find(&self, repo: &str, kind: &str) -> StoreResult<Option<CacheRecord>>;

    /// Insert or update the diagram for `(repo, kind)`, returning the
    /// stored record.
    async fn upsert(&self, repo: &str, kind: &str, diagram: &str) -> StoreResult<CacheRecord>;
}
