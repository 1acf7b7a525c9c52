//! Diagram-Store: SurrealDB Backend for Repogram
//!
//! This crate provides the persistence layer for the repository-to-diagram
//! service. It owns exactly one table: the diagram cache, keyed uniquely by
//! `(repo, kind)`.
//!
//! ## Layer 0 - Data/Persistence
//!
//! Focus: key uniqueness and update-in-place semantics. Concurrent upserts
//! for the same key are last-writer-wins; no request-level locking is done
//! here or anywhere above.
//!
//! ## Key Components
//!
//! - `DiagramCache`: the storage trait consumed by the generation pipeline
//! - `SurrealDiagramCache`: SurrealDB-backed implementation
//! - `fakes::MemoryDiagramCache`: in-memory fake for tests

mod error;
pub mod fakes;
mod migrations;
mod schema;
mod surreal_cache;
pub mod traits;

pub use error::StoreError;
pub use surreal_cache::SurrealDiagramCache;
pub use traits::{CacheRecord, DiagramCache, StoreResult};

/// Result type for diagram-store operations
pub type Result<T> = std::result::Result<T, StoreError>;
