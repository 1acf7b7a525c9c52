//! SurrealDB-backed DiagramCache implementation
//!
//! Uses `schema::DiagramRow` for persistence, converting to
//! `traits::CacheRecord` at the boundary.

use async_trait::async_trait;
use surrealdb::engine::any::Any;
use surrealdb::Surreal;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::migrations;
use crate::schema::DiagramRow;
use crate::traits::{CacheRecord, DiagramCache, StoreResult};

/// SurrealDB-backed implementation of [`DiagramCache`].
pub struct SurrealDiagramCache {
    db: Surreal<Any>,
}

impl SurrealDiagramCache {
    /// Create an in-memory instance for testing.
    ///
    /// Connects to `mem://`, selects `repogram/main`, and runs `init_schema`.
    pub async fn in_memory() -> crate::Result<Self> {
        let db = surrealdb::engine::any::connect("mem://")
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        db.use_ns("repogram")
            .use_db("main")
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        migrations::init_schema(&db).await?;

        info!("SurrealDiagramCache connected (in-memory)");
        Ok(Self { db })
    }

    /// Create from environment variables.
    ///
    /// Honors `SURREALDB_URL` when set; otherwise falls back to local
    /// file-backed persistence in `.repogram/db`.
    pub async fn from_env() -> crate::Result<Self> {
        if let Ok(url) = std::env::var("SURREALDB_URL") {
            let db = surrealdb::engine::any::connect(&url)
                .await
                .map_err(|e| StoreError::Connection(e.to_string()))?;

            db.use_ns("repogram")
                .use_db("main")
                .await
                .map_err(|e| StoreError::Connection(e.to_string()))?;

            migrations::init_schema(&db).await?;
            info!("SurrealDiagramCache connected ({})", url);
            return Ok(Self { db });
        }

        // Default to local persistence in .repogram/db
        let path = ".repogram/db";
        std::fs::create_dir_all(path).map_err(|e| {
            StoreError::Connection(format!(
                "Failed to create database directory {}: {}",
                path, e
            ))
        })?;
        let url = format!("surrealkv://{}", path);
        info!("No SURREALDB_URL found, using local persistence: {}", url);

        let db = surrealdb::engine::any::connect(&url)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to {}: {}", url, e)))?;

        db.use_ns("repogram")
            .use_db("main")
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        migrations::init_schema(&db).await?;
        Ok(Self { db })
    }

    /// Fetch a diagram row by key, if present.
    async fn fetch_row(&self, repo: &str, kind: &str) -> StoreResult<Option<DiagramRow>> {
        let repo_owned = repo.to_string();
        let kind_owned = kind.to_string();
        let mut res = self
            .db
            .query("SELECT * FROM diagrams WHERE repo = $repo AND kind = $kind")
            .bind(("repo", repo_owned))
            .bind(("kind", kind_owned))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let rows: Vec<DiagramRow> = res.take(0).map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(rows.into_iter().next())
    }

    fn row_to_record(row: DiagramRow) -> CacheRecord {
        CacheRecord {
            repo: row.repo,
            kind: row.kind,
            diagram: row.diagram,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl DiagramCache for SurrealDiagramCache {
    async fn find(&self, repo: &str, kind: &str) -> StoreResult<Option<CacheRecord>> {
        let row = self.fetch_row(repo, kind).await?;
        Ok(row.map(Self::row_to_record))
    }

    async fn upsert(&self, repo: &str, kind: &str, diagram: &str) -> StoreResult<CacheRecord> {
        let row = DiagramRow::new(repo.to_string(), kind.to_string(), diagram.to_string());

        // Single statement so two concurrent first-writes for the same
        // key cannot race a SELECT and trip the unique index; the store
        // resolves them last-writer-wins.
        debug!("Upserting cached diagram for {} ({})", repo, kind);
        self.db
            .query("UPSERT diagrams CONTENT $row WHERE repo = $repo AND kind = $kind")
            .bind(("row", row.clone()))
            .bind(("repo", repo.to_string()))
            .bind(("kind", kind.to_string()))
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(Self::row_to_record(row))
    }
}
