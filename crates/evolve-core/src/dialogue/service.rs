//! The advisory service seam.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::ChatMessage;

/// Errors that can occur while talking to the advisory service.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("No API key configured")]
    MissingApiKey,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything one advisory call needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryRequest {
    /// Instruction template with state, turn and tasks substituted
    pub system_instruction: String,
    /// Prior transcript, excluding `user_input`
    pub history: Vec<ChatMessage>,
    pub user_input: String,
}

/// A generative backend returning the raw reply text for a turn.
///
/// Implementations return the text as produced; normalization into a
/// reply and card happens in the engine.
#[async_trait]
pub trait AdvisoryService: Send + Sync {
    async fn generate(&self, request: AdvisoryRequest) -> Result<String, AdvisoryError>;
}

/// Backend used when no API key is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineAdvisor;

#[async_trait]
impl AdvisoryService for OfflineAdvisor {
    async fn generate(&self, _request: AdvisoryRequest) -> Result<String, AdvisoryError> {
        Err(AdvisoryError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_advisor_always_fails() {
        let request = AdvisoryRequest {
            system_instruction: String::new(),
            history: vec![],
            user_input: "hi".into(),
        };
        let err = OfflineAdvisor.generate(request).await.unwrap_err();
        assert!(matches!(err, AdvisoryError::MissingApiKey));
    }
}
