//! OpenAI-compatible chat completion client for Nimbus.
//!
//! This crate implements the [`bot_core::LanguageModel`] trait against any
//! OpenAI-compatible `/v1/chat/completions` endpoint, including tool
//! (function-calling) schemas and tool-call extraction from responses.
//!
//! Configuration comes from environment variables or the builder; the system
//! prompt is loaded from `SYSTEM_PROMPT.md` with a built-in default.

mod api_types;
mod client;
mod config;

pub use api_types::{
    ApiToolCall, CalledFunction, ChatCompletionRequest, ChatCompletionResponse, Choice,
    FunctionDefinition, ResponseMessage, ToolDefinition, Usage,
};
pub use client::ModelClient;
pub use config::{ModelConfig, ModelConfigBuilder, DEFAULT_PROMPT_FILE, DEFAULT_SYSTEM_PROMPT};
