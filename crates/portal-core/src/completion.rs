//! Contract for the external AI-completion collaborator.
//!
//! The messenger and every advisory flow talk to the hosted model through
//! [`CompletionAgent`]. Implementations live in `portal-interaction`; tests supply
//! their own small agents.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Requested shape of the completion output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free text.
    #[default]
    Text,
    /// A JSON document, optionally constrained by a schema.
    Json {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema: Option<serde_json::Value>,
    },
}

/// A single prompt sent to the completion collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Instruction describing who the model is and how it should answer.
    pub system_instruction: String,
    /// The user-facing content of the prompt.
    pub content: String,
    /// Output shape.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

impl CompletionRequest {
    /// Creates a plain-text request.
    pub fn text(system_instruction: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            content: content.into(),
            response_format: ResponseFormat::Text,
        }
    }

    /// Creates a request that asks for a JSON document.
    pub fn json(system_instruction: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            content: content.into(),
            response_format: ResponseFormat::Json { schema: None },
        }
    }

    /// Attaches a JSON schema to a JSON request.
    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_format = ResponseFormat::Json {
            schema: Some(schema),
        };
        self
    }

    /// Returns true when the caller expects JSON back.
    pub fn expects_json(&self) -> bool {
        matches!(self.response_format, ResponseFormat::Json { .. })
    }
}

/// Failures reported by a completion agent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompletionError {
    /// No agent is configured (missing API key, offline mode).
    #[error("completion service unavailable: {0}")]
    Unavailable(String),

    /// The remote service answered with an error or could not be reached.
    #[error("completion request failed: {message}")]
    Process {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
    },

    /// The service answered without any text.
    #[error("completion returned no text")]
    EmptyResponse,

    /// The answer could not be interpreted in the requested format.
    #[error("malformed completion: {0}")]
    Malformed(String),
}

impl CompletionError {
    /// Returns true when a manual resend could reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Process { is_retryable, .. } => *is_retryable,
            Self::EmptyResponse => true,
            Self::Unavailable(_) | Self::Malformed(_) => false,
        }
    }
}

/// Given a prompt, eventually returns text or fails.
#[async_trait]
pub trait CompletionAgent: Send + Sync {
    /// Short human-readable description of the backing model.
    fn name(&self) -> &str;

    /// Executes one completion request.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}

/// Parses a JSON completion into a typed value.
///
/// Models occasionally wrap JSON in a fenced code block even when asked not to,
/// so a single surrounding fence is stripped before parsing.
pub fn parse_json_completion<T>(text: &str) -> Result<T, CompletionError>
where
    T: serde::de::DeserializeOwned,
{
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CompletionError::EmptyResponse);
    }
    let body = strip_code_fence(trimmed);
    serde_json::from_str(body).map_err(|e| CompletionError::Malformed(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        value: u32,
    }

    #[test]
    fn test_parse_plain_json() {
        let sample: Sample = parse_json_completion(r#"{"value": 7}"#).unwrap();
        assert_eq!(sample, Sample { value: 7 });
    }

    #[test]
    fn test_parse_fenced_json() {
        let sample: Sample = parse_json_completion("```json\n{\"value\": 3}\n```").unwrap();
        assert_eq!(sample.value, 3);
    }

    #[test]
    fn test_parse_empty_is_empty_response() {
        let err = parse_json_completion::<Sample>("   ").unwrap_err();
        assert_eq!(err, CompletionError::EmptyResponse);
    }

    #[test]
    fn test_parse_garbage_is_malformed() {
        let err = parse_json_completion::<Sample>("not json").unwrap_err();
        assert!(matches!(err, CompletionError::Malformed(_)));
    }

    #[test]
    fn test_json_request_with_schema() {
        let request = CompletionRequest::json("sys", "body")
            .with_schema(serde_json::json!({ "type": "array" }));
        assert!(request.expects_json());
        assert!(!CompletionRequest::text("sys", "body").expects_json());
    }
}
