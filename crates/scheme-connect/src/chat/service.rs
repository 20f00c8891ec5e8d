use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use super::profile::UserProfile;
use super::sanitize::sanitize_reply;
use super::session::{ChatError, SessionStore, TurnState};
use crate::eligibility::{eligible_schemes, SchemeMatch};
use crate::reply::{template_reply, ReplyGenerator};

/// What one chat turn hands back to the transport layer.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    pub reply: String,
    pub schemes: Vec<SchemeMatch>,
    pub next_question: Option<String>,
}

/// Conversation facade composing the session store, the eligibility
/// evaluator, and the reply generator.
pub struct ChatService {
    store: SessionStore,
    generator: Arc<dyn ReplyGenerator>,
}

impl ChatService {
    pub fn new(store: SessionStore, generator: Arc<dyn ReplyGenerator>) -> Self {
        Self { store, generator }
    }

    pub async fn handle_turn(
        &self,
        session_id: &str,
        overrides: &UserProfile,
        message: &str,
    ) -> Result<ChatOutcome, ChatError> {
        match self.store.begin_turn(session_id, overrides, message)? {
            TurnState::NeedMore { prompt } => Ok(ChatOutcome {
                reply: prompt.clone(),
                schemes: Vec::new(),
                next_question: Some(prompt),
            }),
            TurnState::Ready { profile, history } => {
                let schemes = eligible_schemes(&profile);

                // The generator runs outside the session lock; its failure
                // downgrades the turn to the template reply.
                let reply = match self
                    .generator
                    .generate(message, &schemes, &profile, &history)
                    .await
                {
                    Ok(text) => text,
                    Err(err) => {
                        warn!(error = %err, "reply generation failed, using template");
                        template_reply(&schemes)
                    }
                };
                let reply = sanitize_reply(&reply);
                self.store.record_reply(session_id, &reply);

                Ok(ChatOutcome {
                    reply,
                    schemes,
                    next_question: None,
                })
            }
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }
}
