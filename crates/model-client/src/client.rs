//! The chat-completion client.

use reqwest::Client;
use tracing::{debug, info, warn};

use bot_core::{
    async_trait, ChatMessage, LanguageModel, ModelError, ModelReply, ToolCall, ToolDescriptor,
};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ToolDefinition};
use crate::config::ModelConfig;

/// A [`LanguageModel`] backed by an OpenAI-compatible chat-completions API.
pub struct ModelClient {
    client: Client,
    config: ModelConfig,
}

impl ModelClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ModelConfig) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ModelError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!(
            "Model client initialized: {} via {}",
            config.model, config.base_url
        );

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    ///
    /// See [`ModelConfig::from_env`] for the variables involved.
    pub fn from_env() -> Result<Self, ModelError> {
        Self::new(ModelConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ModelError> {
        let url = format!("{}/v1/chat/completions", self.config.base_url);

        debug!("Sending completion request for model {}", request.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse the provider's structured error first
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(ModelError::Api {
                    status: status.as_u16(),
                    message: api_error.error.message,
                });
            }

            return Err(ModelError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Parse(e.to_string()))?;

        Ok(completion)
    }
}

#[async_trait]
impl LanguageModel for ModelClient {
    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
        tools: &[ToolDescriptor],
    ) -> Result<ModelReply, ModelError> {
        let mut api_messages = Vec::with_capacity(messages.len() + 1);
        api_messages.push(ChatMessage::system(system_prompt));
        api_messages.extend_from_slice(messages);

        let tool_definitions: Vec<ToolDefinition> =
            tools.iter().map(ToolDefinition::from).collect();

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: api_messages,
            tool_choice: if tool_definitions.is_empty() {
                None
            } else {
                Some("auto".to_string())
            },
            tools: if tool_definitions.is_empty() {
                None
            } else {
                Some(tool_definitions)
            },
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let completion = self.chat_completion(request).await?;

        if let Some(ref usage) = completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        let choice = completion.choices.into_iter().next().ok_or_else(|| {
            warn!("Completion response contained no choices");
            ModelError::Parse("response contained no choices".to_string())
        })?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCall {
                id: call.id,
                name: call.function.name,
                arguments_json: call.function.arguments,
            })
            .collect();

        Ok(ModelReply {
            text: choice.message.content.filter(|c| !c.trim().is_empty()),
            tool_calls,
        })
    }
}
