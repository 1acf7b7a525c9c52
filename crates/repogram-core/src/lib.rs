//! Repogram Core Library
//!
//! Domain logic for the repository-to-diagram service: diagram kinds,
//! repository reference parsing, the Mermaid repair engine, the prompt
//! templates, and the generation pipeline that ties the injected
//! collaborators (context source, narrator, cache) together.

pub mod error;
pub mod kind;
pub mod pipeline;
pub mod prompts;
pub mod repair;
pub mod repo_ref;
pub mod telemetry;

pub use error::{RepogramError, Result};
pub use kind::DiagramKind;
pub use pipeline::{DiagramPipeline, GenerateOutcome, GenerateRequest};
pub use repair::repair;
pub use repo_ref::RepoRef;
