//! LLM-Narrator: Model Integration for Repogram
//!
//! Sends a system instruction plus assembled repository context to a
//! chat-completions endpoint and returns the raw diagram text.
//!
//! ## Layer 3 - Model Integration
//!
//! Failures are surfaced as a typed [`NarrationError`], never as inline
//! placeholder text: the decision to degrade a failure into placeholder
//! diagram text lives in the generation pipeline, not here.

mod chat;
mod error;

use async_trait::async_trait;

pub use chat::{ChatNarrator, NarratorConfig};
pub use error::NarrationError;

/// Result type for narration operations
pub type Result<T> = std::result::Result<T, NarrationError>;

/// Source of raw diagram text.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// Send `system` instruction and `user` content to the model and
    /// return its completion text.
    async fn narrate(&self, system: &str, user: &str) -> Result<String>;
}
