//! SurrealDB schema initialization
//!
//! Sets up the `diagrams` table with its uniqueness constraint.

use crate::Result;
use surrealdb::engine::any::Any;
use surrealdb::Surreal;
use tracing::{debug, info};

/// Initialize all Repogram tables in SurrealDB
///
/// This should be called once on first connection to set up the schema.
/// Safe to call multiple times (idempotent).
pub async fn init_schema(db: &Surreal<Any>) -> Result<()> {
    info!("Initializing Repogram SurrealDB schema");

    init_diagrams_table(db).await?;

    info!("Repogram schema initialization complete");
    Ok(())
}

/// Initialize the `diagrams` table with constraints and indexes
///
/// Schema:
/// ```text
/// TABLE diagrams {
///   repo:        STRING (lowercase owner/name, indexed)
///   kind:        STRING (flowchart | class | state | c4)
///   diagram:     STRING (cleaned Mermaid source)
///   created_at:  DATETIME
/// }
/// ```
///
/// Constraints:
/// - `(repo, kind)` is unique: one cached diagram per repository per kind.
/// - Entries are never deleted by the application (delete NONE).
async fn init_diagrams_table(db: &Surreal<Any>) -> Result<()> {
    debug!("Initializing diagrams table");

    let sql = r#"
        DEFINE TABLE diagrams
            SCHEMALESS
            PERMISSIONS
                FOR create FULL
                FOR select FULL
                FOR update FULL
                FOR delete NONE;

        -- One cached diagram per (repo, kind)
        DEFINE INDEX idx_repo_kind ON TABLE diagrams COLUMNS repo, kind UNIQUE;
    "#;

    db.query(sql)
        .await
        .map_err(|e| crate::StoreError::SchemaSetup(e.to_string()))?;

    debug!("diagrams table initialized");
    Ok(())
}
