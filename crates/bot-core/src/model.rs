//! Language model trait and the function-calling surface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::ChatMessage;

/// Errors that can occur while talking to the model backend.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Missing or invalid configuration (e.g. no API key).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network-level failure reaching the backend.
    #[error("network error: {0}")]
    Network(String),

    /// The backend returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The backend's response could not be parsed.
    #[error("failed to parse response: {0}")]
    Parse(String),
}

/// Static declaration of a callable tool.
///
/// Handed to the model as advisory metadata; execution is always mediated
/// and re-authorized by the dispatcher and handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name, used for exact-match dispatch.
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema object describing the tool's parameters.
    pub parameters: Value,
}

/// One tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    /// Provider-assigned id for this call.
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// Arguments as a raw JSON string, validated at the dispatch boundary.
    pub arguments_json: String,
}

/// What the model returned for one completion request.
#[derive(Debug, Clone, Default)]
pub struct ModelReply {
    /// Final text, if the model produced any.
    pub text: Option<String>,
    /// Tool calls, in the order the model issued them.
    pub tool_calls: Vec<ToolCall>,
}

impl ModelReply {
    /// Whether the reply carries neither text nor tool calls.
    pub fn is_empty(&self) -> bool {
        self.tool_calls.is_empty()
            && self.text.as_deref().map(str::trim).unwrap_or("").is_empty()
    }
}

/// Trait for chat-completion backends.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Run one completion over `messages` with `tools` available.
    ///
    /// The system prompt is passed separately so implementations can place it
    /// according to their provider's convention.
    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> Result<ModelReply, ModelError>;
}
