use async_trait::async_trait;
use portal_core::completion::{CompletionAgent, CompletionError, CompletionRequest};

/// Stand-in used when no API key is configured or `--offline` is given.
///
/// Every request fails with [`CompletionError::Unavailable`], which drives the
/// messenger's "assistant unavailable" notice and the advisory fallback.
#[derive(Debug, Clone)]
pub struct OfflineAgent {
    reason: String,
}

impl OfflineAgent {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[async_trait]
impl CompletionAgent for OfflineAgent {
    fn name(&self) -> &str {
        "offline"
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<String, CompletionError> {
        Err(CompletionError::Unavailable(self.reason.clone()))
    }
}
