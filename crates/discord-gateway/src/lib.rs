//! Discord gateway wiring for Nimbus.
//!
//! This crate adapts the platform-neutral core to Discord via serenity:
//!
//! - [`DiscordApi`] implements [`bot_core::Messenger`] and
//!   [`bot_core::GuildModerator`] over serenity's HTTP client
//! - [`Handler`] receives gateway events, converts them to
//!   [`bot_core::InboundMessage`], and hands them to the orchestrator
//! - [`AdminCommands`] serves the `!memory_stats`, `!reset_memory`, and
//!   `!admin_logs` prefix commands
//! - `src/bin/nimbus.rs` is the composition root: it builds every component
//!   once at startup and injects the collaborators explicitly

mod actions;
mod commands;
mod config;
mod handler;

pub use actions::DiscordApi;
pub use commands::AdminCommands;
pub use config::{GatewayConfig, GatewayError};
pub use handler::Handler;
