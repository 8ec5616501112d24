//! Chat-completion API request and response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use bot_core::{ChatMessage, ToolDescriptor};

/// A function tool definition in the provider's wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool type (always "function").
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function specification.
    pub function: FunctionDefinition,
}

/// Function specification for a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Name of the function.
    pub name: String,
    /// Description of what the function does.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the function parameters.
    pub parameters: Value,
}

impl From<&ToolDescriptor> for ToolDefinition {
    fn from(descriptor: &ToolDescriptor) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: descriptor.name.clone(),
                description: Some(descriptor.description.clone()),
                parameters: descriptor.parameters.clone(),
            },
        }
    }
}

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model to use
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<ChatMessage>,
    /// Tools to make available (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    /// Tool choice mode ("auto" when tools are present)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response choices
    pub choices: Vec<Choice>,
    /// Token usage
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// A response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The message
    pub message: ResponseMessage,
    /// Finish reason
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Response message (content may be null when tool calls are present).
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Role
    pub role: String,
    /// Content (may be null if tool calls)
    #[serde(default)]
    pub content: Option<String>,
    /// Tool calls requested by the model
    #[serde(default)]
    pub tool_calls: Option<Vec<ApiToolCall>>,
}

/// A tool call in the provider's wire format.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiToolCall {
    /// Provider-assigned call id
    pub id: String,
    /// The called function
    pub function: CalledFunction,
}

/// The function part of a tool call.
#[derive(Debug, Clone, Deserialize)]
pub struct CalledFunction {
    /// Function name
    pub name: String,
    /// Arguments as a JSON string
    pub arguments: String,
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Completion tokens
    pub completion_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
}

/// API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Error details
    pub error: ApiErrorDetails,
}

/// API error details.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetails {
    /// Error message
    pub message: String,
    /// Error type
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definition_from_descriptor() {
        let descriptor = ToolDescriptor {
            name: "search".to_string(),
            description: "Search the web".to_string(),
            parameters: serde_json::json!({"type": "object"}),
        };

        let definition = ToolDefinition::from(&descriptor);
        assert_eq!(definition.tool_type, "function");
        assert_eq!(definition.function.name, "search");
        assert_eq!(definition.function.description.as_deref(), Some("Search the web"));
    }

    #[test]
    fn test_response_with_tool_calls_parses() {
        let json = r#"{
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "kick_user", "arguments": "{\"user_mention\": \"<@42>\", \"reason\": \"spam\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        let message = &response.choices[0].message;
        assert!(message.content.is_none());
        let calls = message.tool_calls.as_ref().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].function.name, "kick_user");
    }

    #[test]
    fn test_request_omits_empty_tool_fields() {
        let request = ChatCompletionRequest {
            model: "test".to_string(),
            messages: vec![ChatMessage::user("hi")],
            tools: None,
            tool_choice: None,
            max_tokens: None,
            temperature: Some(0.7),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("tools"));
        assert!(!json.contains("max_tokens"));
    }
}
