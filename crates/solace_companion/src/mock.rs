//! Canned companion for tests — fixed reply or forced failure.

use crate::{CompanionClient, CompanionError};

#[derive(Debug, Clone, Default)]
pub struct MockCompanion {
    reply: Option<String>,
}

impl MockCompanion {
    /// A companion that always answers with `reply`.
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
        }
    }

    /// A companion whose every call fails.
    pub fn failing() -> Self {
        Self { reply: None }
    }
}

#[async_trait::async_trait]
impl CompanionClient for MockCompanion {
    async fn reply(&self, _prompt: &str) -> Result<String, CompanionError> {
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(CompanionError::Api("mock failure".to_string())),
        }
    }
}
