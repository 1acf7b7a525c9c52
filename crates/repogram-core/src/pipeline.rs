//! Diagram generation pipeline.
//!
//! Wires the cache, the repository context source, and the narrator
//! together: cache lookup first, then fetch + narrate + repair on a
//! miss, storing the repaired result for the next caller.

use std::sync::Arc;

use tracing::{debug, info, warn};

use diagram_store::DiagramCache;
use llm_narrator::Narrator;
use repo_context::{ContextSource, RepoContext};

use crate::error::{RepogramError, Result};
use crate::kind::DiagramKind;
use crate::prompts::system_prompt;
use crate::repair::repair;
use crate::repo_ref::RepoRef;

/// One generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub repo: RepoRef,
    pub kind: DiagramKind,
    /// Per-request API credential for the upstream repository host;
    /// falls back to the source's own configured token when absent.
    pub credential: Option<String>,
    /// Skip the cache lookup and overwrite any stored diagram.
    pub force_refresh: bool,
}

impl GenerateRequest {
    pub fn new(repo: RepoRef, kind: DiagramKind) -> Self {
        Self {
            repo,
            kind,
            credential: None,
            force_refresh: false,
        }
    }
}

/// Result of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub diagram: String,
    /// True when the diagram came straight from the cache.
    pub cached: bool,
}

/// The orchestrator. All collaborators are injected as trait objects so
/// tests can swap in fakes.
pub struct DiagramPipeline {
    context: Arc<dyn ContextSource>,
    narrator: Arc<dyn Narrator>,
    cache: Arc<dyn DiagramCache>,
}

impl DiagramPipeline {
    pub fn new(
        context: Arc<dyn ContextSource>,
        narrator: Arc<dyn Narrator>,
        cache: Arc<dyn DiagramCache>,
    ) -> Self {
        Self {
            context,
            narrator,
            cache,
        }
    }

    /// Produce a diagram for `request.repo`, consulting the cache first.
    ///
    /// When narration fails the pipeline degrades to a placeholder
    /// diagram describing the failure; placeholders are returned to the
    /// caller but never written to the cache.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutcome> {
        let repo = request.repo.canonical();
        let kind = request.kind;

        if !request.force_refresh {
            if let Some(record) = self.cache.find(&repo, kind.as_str()).await? {
                info!(%repo, kind = kind.as_str(), "cache hit");
                return Ok(GenerateOutcome {
                    diagram: record.diagram,
                    cached: true,
                });
            }
        }

        debug!(%repo, kind = kind.as_str(), "cache miss, fetching repository context");
        let context = self
            .context
            .fetch_context(
                request.repo.owner(),
                request.repo.name(),
                request.credential.as_deref(),
            )
            .await
            .map_err(RepogramError::from)?;

        let user_content = assemble_user_content(&request.repo, kind, &context);

        match self.narrator.narrate(system_prompt(kind), &user_content).await {
            Ok(narration) => {
                let diagram = repair(&narration, kind);
                self.cache.upsert(&repo, kind.as_str(), &diagram).await?;
                info!(%repo, kind = kind.as_str(), "diagram generated and cached");
                Ok(GenerateOutcome {
                    diagram,
                    cached: false,
                })
            }
            Err(err) => {
                warn!(%repo, kind = kind.as_str(), error = %err, "narration failed, returning placeholder");
                let placeholder = format!("Error generating diagram: {err}");
                Ok(GenerateOutcome {
                    diagram: repair(&placeholder, kind),
                    cached: false,
                })
            }
        }
    }
}

/// Build the user message handed to the narrator: the repository
/// context wrapped in labelled sections, followed by an instruction
/// naming the diagram kind.
fn assemble_user_content(repo: &RepoRef, kind: DiagramKind, context: &RepoContext) -> String {
    format!(
        "<CONTEXT>\n\
         Repo: {repo}\n\
         Branch: {branch}\n\
         Base URL: {base_url}\n\
         </CONTEXT>\n\n\
         <FILE_TREE>\n{file_tree}\n</FILE_TREE>\n\n\
         <README>\n{readme}\n</README>\n\
         IMPORTANT: Generate a {kind} diagram.",
        repo = repo.canonical(),
        branch = context.default_branch,
        base_url = repo.blob_base_url(&context.default_branch),
        file_tree = context.file_tree,
        readme = context.readme,
        kind = kind.as_str(),
    )
}
