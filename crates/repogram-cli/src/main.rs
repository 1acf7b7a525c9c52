//! Repogram - Repository architecture diagrams from the command line
//!
//! The `repogram` command turns a GitHub repository reference into a
//! Mermaid architecture diagram.
//!
//! ## Commands
//!
//! - `generate`: Fetch a repository, narrate it, and print the diagram
//! - `repair`: Run existing diagram text through the repair engine

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;

use diagram_store::{DiagramCache, SurrealDiagramCache};
use llm_narrator::{ChatNarrator, Narrator};
use repo_context::{ContextSource, GitHubContextSource};
use repogram_core::{
    repair, DiagramKind, DiagramPipeline, GenerateRequest, RepoRef,
};

#[derive(Parser)]
#[command(name = "repogram")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Repository architecture diagrams via Mermaid", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a diagram for a GitHub repository
    Generate {
        /// Repository reference: "owner/name" or a full GitHub URL
        repo: String,

        /// Diagram kind: flowchart, class, state, or c4
        #[arg(short = 't', long, default_value = "flowchart")]
        diagram_type: String,

        /// GitHub personal access token for private repositories
        #[arg(long, env = "GITHUB_PAT")]
        pat: Option<String>,

        /// Skip the cache and regenerate
        #[arg(long)]
        force_refresh: bool,

        /// Use a throwaway in-memory cache instead of the configured store
        #[arg(long)]
        no_cache: bool,
    },

    /// Repair existing Mermaid diagram text
    Repair {
        /// Input file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Diagram kind: flowchart, class, state, or c4
        #[arg(short = 't', long, default_value = "flowchart")]
        diagram_type: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    repogram_core::telemetry::init_tracing(cli.json, level);

    match cli.command {
        Commands::Generate {
            repo,
            diagram_type,
            pat,
            force_refresh,
            no_cache,
        } => cmd_generate(&repo, &diagram_type, pat, force_refresh, no_cache).await,
        Commands::Repair {
            input,
            diagram_type,
        } => cmd_repair(input.as_deref(), &diagram_type),
    }
}

async fn cmd_generate(
    repo: &str,
    diagram_type: &str,
    pat: Option<String>,
    force_refresh: bool,
    no_cache: bool,
) -> Result<()> {
    let repo = RepoRef::parse(repo)?;
    let kind = diagram_type.parse::<DiagramKind>()?;

    let cache: Arc<dyn DiagramCache> = if no_cache {
        Arc::new(diagram_store::fakes::MemoryDiagramCache::new())
    } else {
        Arc::new(
            SurrealDiagramCache::from_env()
                .await
                .context("Failed to open the diagram cache")?,
        )
    };
    let context: Arc<dyn ContextSource> = Arc::new(GitHubContextSource::from_env());
    let narrator: Arc<dyn Narrator> = Arc::new(ChatNarrator::from_env());
    let pipeline = DiagramPipeline::new(context, narrator, cache);

    let mut request = GenerateRequest::new(repo, kind);
    request.credential = pat;
    request.force_refresh = force_refresh;

    let outcome = pipeline.generate(&request).await?;
    if outcome.cached {
        tracing::info!("served from cache");
    }
    println!("{}", outcome.diagram);
    Ok(())
}

fn cmd_repair(input: Option<&std::path::Path>, diagram_type: &str) -> Result<()> {
    let kind = diagram_type.parse::<DiagramKind>()?;

    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    println!("{}", repair(&raw, kind));
    Ok(())
}
