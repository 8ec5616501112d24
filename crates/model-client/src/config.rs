//! Configuration for the model client.

use std::env;
use std::path::Path;

use bot_core::ModelError;

/// Default system prompt file name.
pub const DEFAULT_PROMPT_FILE: &str = "SYSTEM_PROMPT.md";

/// Built-in system prompt, used when no file or env override is present.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are Nimbus, a friendly and helpful AI-powered Discord administration bot.

You remember users by their display names and address them personally for \
better engagement.

You can answer general questions, help with server-related queries, and \
assist administrators with moderation tasks.

When administrators need to perform actions like kicking, banning, creating \
channels, or checking user activity, you have tools available to help them. \
Use these tools when appropriate based on the conversation context.

Always be respectful, helpful, and maintain a positive tone. You have access \
to the conversation history, so you can reference previous discussions.";

/// Configuration for [`crate::ModelClient`].
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// System prompt handed to the orchestrator.
    pub system_prompt: String,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: Some(2000),
            temperature: Some(0.7),
            timeout_secs: 60,
        }
    }
}

impl ModelConfig {
    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `OPENAI_API_KEY` - API key for authentication
    ///
    /// Optional:
    /// - `OPENAI_BASE_URL` - API base URL (default: <https://api.openai.com>)
    /// - `OPENAI_MODEL` - model name (default: gpt-4o-mini)
    /// - `NIMBUS_SYSTEM_PROMPT` - system prompt (overrides the prompt file)
    /// - `NIMBUS_PROMPT_FILE` - path to prompt file (default: SYSTEM_PROMPT.md)
    /// - `OPENAI_MAX_TOKENS` - max tokens (default: 2000)
    /// - `OPENAI_TEMPERATURE` - temperature (default: 0.7)
    ///
    /// System prompt priority: env var, then prompt file, then the built-in
    /// default.
    pub fn from_env() -> Result<Self, ModelError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| ModelError::Configuration("OPENAI_API_KEY not set".to_string()))?;

        let base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com".to_string());

        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let system_prompt = if let Ok(prompt) = env::var("NIMBUS_SYSTEM_PROMPT") {
            prompt
        } else {
            let prompt_file =
                env::var("NIMBUS_PROMPT_FILE").unwrap_or_else(|_| DEFAULT_PROMPT_FILE.to_string());
            load_prompt_file(&prompt_file).unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string())
        };

        let max_tokens = env::var("OPENAI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(2000));

        let temperature = env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.7));

        Ok(Self {
            base_url,
            api_key,
            model,
            system_prompt,
            max_tokens,
            temperature,
            timeout_secs: 60,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> ModelConfigBuilder {
        ModelConfigBuilder::default()
    }
}

/// Builder for [`ModelConfig`].
#[derive(Debug, Default)]
pub struct ModelConfigBuilder {
    config: ModelConfig,
}

impl ModelConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the HTTP timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ModelConfig {
        self.config
    }
}

/// Load a prompt file, returning None if not found or empty.
fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();

    match std::fs::read_to_string(path) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}
