//! Schema definitions for the Repogram SurrealDB tables
//!
//! Tables:
//! - diagrams: one cached diagram per (repo, kind)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Module for serializing chrono DateTime to SurrealDB datetime format
mod surreal_datetime {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};
    use surrealdb::sql::Datetime as SurrealDatetime;

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let sd = SurrealDatetime::from(*date);
        serde::Serialize::serialize(&sd, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let sd = SurrealDatetime::deserialize(deserializer)?;
        Ok(DateTime::from(sd))
    }
}

/// Database row for the `diagrams` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramRow {
    pub repo: String,
    pub kind: String,
    pub diagram: String,
    #[serde(with = "surreal_datetime")]
    pub created_at: DateTime<Utc>,
}

impl DiagramRow {
    pub fn new(repo: String, kind: String, diagram: String) -> Self {
        DiagramRow {
            repo,
            kind,
            diagram,
            created_at: Utc::now(),
        }
    }
}
