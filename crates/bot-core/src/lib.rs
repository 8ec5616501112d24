//! Core types and traits for the Nimbus Discord bot.
//!
//! This crate provides the shared vocabulary used by every other crate in
//! the workspace:
//!
//! - [`InboundMessage`] - a platform-neutral view of one inbound channel message
//! - [`ChatMessage`] - one turn handed to the language model
//! - [`ToolDescriptor`] / [`ToolCall`] / [`ModelReply`] - the function-calling
//!   surface between the model and the tool dispatcher
//! - [`LanguageModel`] - the trait a chat-completion backend implements
//! - [`Messenger`] / [`GuildModerator`] - the narrow platform interfaces the
//!   orchestrator and tool handlers act through
//! - [`CallerContext`] - who asked, where, and with what privilege
//!
//! No I/O happens here; collaborator crates implement the traits.

mod context;
mod message;
mod model;
mod platform;

pub use context::CallerContext;
pub use message::{ChatMessage, InboundMessage, QuotedMessage};
pub use model::{LanguageModel, ModelError, ModelReply, ToolCall, ToolDescriptor};
pub use platform::{
    ChannelKind, CreatedChannel, GuildModerator, MemberInfo, Messenger, PlatformError,
};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
