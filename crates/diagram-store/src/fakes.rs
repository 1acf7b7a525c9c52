//! In-memory fake for the diagram cache (testing only)
//!
//! `MemoryDiagramCache` satisfies the [`DiagramCache`] contract without any
//! external dependencies.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::traits::{CacheRecord, DiagramCache, StoreResult};

/// In-memory diagram cache backed by a `HashMap<(repo, kind), CacheRecord>`.
#[derive(Debug, Default)]
pub struct MemoryDiagramCache {
    entries: Mutex<HashMap<(String, String), CacheRecord>>,
}

impl MemoryDiagramCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries (test helper).
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DiagramCache for MemoryDiagramCache {
    async fn find(&self, repo: &str, kind: &str) -> StoreResult<Option<CacheRecord>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(&(repo.to_string(), kind.to_string())).cloned())
    }

    async fn upsert(&self, repo: &str, kind: &str, diagram: &str) -> StoreResult<CacheRecord> {
        let record = CacheRecord {
            repo: repo.to_string(),
            kind: kind.to_string(),
            diagram: diagram.to_string(),
            created_at: Utc::now(),
        };
        let mut entries = self.entries.lock().unwrap();
        entries.insert((repo.to_string(), kind.to_string()), record.clone());
        Ok(record)
    }
}
