//! Conversational reply generation.
//!
//! Two interchangeable variants sit behind [`ReplyGenerator`]: a Gemini
//! backed generator when an API key is configured, and the deterministic
//! template generator otherwise. The chat flow behaves identically under
//! either; only the prose richness differs, and a generator error always
//! degrades to the template text.

mod gemini;
mod template;

pub use gemini::GeminiReplyGenerator;
pub use template::{template_reply, TemplateReplyGenerator};

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::chat::ChatTurn;
use crate::config::GeminiConfig;
use crate::eligibility::{EligibilityProfile, SchemeMatch};

#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("model returned empty content")]
    EmptyContent,
}

#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate(
        &self,
        user_message: &str,
        eligible: &[SchemeMatch],
        profile: &EligibilityProfile,
        history: &[ChatTurn],
    ) -> Result<String, ReplyError>;

    /// Whether a real language model backs this generator.
    fn is_available(&self) -> bool;
}

/// Picks the generator variant from configuration presence.
pub fn reply_generator_from_config(config: &GeminiConfig) -> Arc<dyn ReplyGenerator> {
    match &config.api_key {
        Some(api_key) => {
            info!(model = %config.model, "reply generation backed by Gemini");
            Arc::new(GeminiReplyGenerator::new(
                api_key.clone(),
                config.model.clone(),
            ))
        }
        None => {
            info!("reply generation using template responses");
            Arc::new(TemplateReplyGenerator)
        }
    }
}
