//! Repogram daemon: serves diagram generation over a JSON API.
//!
//! Configuration is environment-driven:
//! - `REPOGRAM_BIND` bind address (default `127.0.0.1:8080`)
//! - `SURREALDB_URL` cache location (default `surrealkv://.repogram/db`)
//! - `GITHUB_PAT` fallback GitHub token for private repositories
//! - `LLM_BASE_URL`, `LLM_API_KEY`, `LLM_MODEL_NAME` narration endpoint

mod routes;

use std::sync::Arc;

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use diagram_store::{DiagramCache, SurrealDiagramCache};
use llm_narrator::{ChatNarrator, Narrator};
use repo_context::{ContextSource, GitHubContextSource};
use repogram_core::DiagramPipeline;

use routes::{router, AppState};

const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cache: Arc<dyn DiagramCache> = Arc::new(SurrealDiagramCache::from_env().await?);
    let context: Arc<dyn ContextSource> = Arc::new(GitHubContextSource::from_env());
    let narrator: Arc<dyn Narrator> = Arc::new(ChatNarrator::from_env());

    let pipeline = DiagramPipeline::new(context, narrator, cache);
    let app = router(Arc::new(AppState { pipeline }));

    let bind = std::env::var("REPOGRAM_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("repogramd listening on {bind}");
    axum::serve(listener, app).await?;

    Ok(())
}
