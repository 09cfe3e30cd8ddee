//! The response-generation collaborator.
//!
//! Everything conversational goes through an external model server; this
//! crate is the thin, failure-tolerant glue. The one hard rule: a
//! collaborator failure never reaches the end user as an error — they
//! get a fixed, gentle fallback line instead.

pub mod mock;
pub mod ollama;

pub use mock::MockCompanion;
pub use ollama::OllamaClient;

use async_trait::async_trait;
use thiserror::Error;

/// Generic fallback when the collaborator errors.
pub const FALLBACK_REPLY: &str =
    "I'm here for you, but something went wrong getting my thoughts.";

/// Fallback when the collaborator can't be reached at all.
pub const FALLBACK_OFFLINE_REPLY: &str =
    "I'm here for you, but I'm having trouble connecting to my thinking system.";

#[derive(Debug, Error)]
pub enum CompanionError {
    #[error("could not reach the companion model")]
    Unreachable(#[source] reqwest::Error),
    #[error("companion model returned an error: {0}")]
    Api(String),
    #[error("companion reply was malformed: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait CompanionClient: Send + Sync {
    /// Produce a conversational reply to an already-assembled prompt.
    async fn reply(&self, prompt: &str) -> Result<String, CompanionError>;
}

/// Wrap the user's own words in the warm companion persona. Only the
/// utterance goes inside the quotes — accumulated memory belongs in a
/// preamble, not in the user's mouth.
pub fn companion_prompt(user_text: &str) -> String {
    format!(
        "You are a kind and thoughtful companion for an elderly person.\n\
         They just said: \"{user_text}\"\n\
         Respond in a warm, gentle, and friendly way. Keep it short and caring."
    )
}

/// The full prompt: remembered facts as a preamble ahead of the persona
/// template. With nothing remembered this is just [`companion_prompt`].
pub fn companion_prompt_with_memory(memory: &str, user_text: &str) -> String {
    if memory.is_empty() {
        return companion_prompt(user_text);
    }
    format!(
        "Here is what you remember about the user:\n{memory}\n\n{}",
        companion_prompt(user_text)
    )
}

/// Ask the collaborator for a reply; on any failure, log it and hand
/// back a gentle fixed message instead of the error.
pub async fn reply_or_fallback(client: &dyn CompanionClient, prompt: &str) -> String {
    match client.reply(prompt).await {
        Ok(reply) => reply,
        Err(CompanionError::Unreachable(e)) => {
            tracing::error!("companion model unreachable: {e}");
            FALLBACK_OFFLINE_REPLY.to_string()
        }
        Err(e) => {
            tracing::error!("companion reply failed: {e}");
            FALLBACK_REPLY.to_string()
        }
    }
}
