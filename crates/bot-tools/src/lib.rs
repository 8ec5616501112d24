//! Tool registry, dispatcher, and handlers for the Nimbus Discord bot.
//!
//! This crate declares which callable tools exist, filters them by caller
//! privilege, and routes model-issued tool invocations to handlers. The
//! dispatcher never fails a conversation turn: unknown tools, malformed
//! arguments, and handler errors all degrade to a descriptive result string.
//!
//! The privilege filter on the descriptor list is advisory metadata for the
//! model, not an authorization boundary - every handler re-checks the
//! caller's privilege before acting.
//!
//! # Tools
//!
//! - [`SearchTool`] - web search via Google Custom Search (everyone).
//! - [`KickTool`] / [`BanTool`] - remove a member (admins only, hierarchy
//!   guarded, audit logged).
//! - [`CreateChannelTool`] - create a text or voice channel (admins only,
//!   audit logged).
//! - [`ActivityTool`] - a user's stored activity profile (admins only,
//!   audit logged).

mod error;
mod mention;
mod registry;
mod tool;
pub mod tools;

pub use error::ToolError;
pub use mention::parse_user_mention;
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolOutput};
pub use tools::{
    ActivityTool, BanTool, CreateChannelTool, KickTool, SearchConfig, SearchHit, SearchTool,
};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
