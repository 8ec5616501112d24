//! Gateway configuration.

use std::env;

use thiserror::Error;

use memory::DEFAULT_TOKEN_CEILING;

/// Errors raised while assembling gateway configuration.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Configuration for the gateway process.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Discord bot token.
    pub discord_token: String,
    /// SQLite database URL.
    pub database_url: String,
    /// Per-channel token ceiling for conversation memory.
    pub token_ceiling: i64,
}

impl GatewayConfig {
    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `DISCORD_TOKEN` - bot token
    ///
    /// Optional:
    /// - `DATABASE_URL` - SQLite URL (default: `sqlite:nimbus.db?mode=rwc`)
    /// - `NIMBUS_TOKEN_CEILING` - memory ceiling (default: 400000)
    pub fn from_env() -> Result<Self, GatewayError> {
        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| GatewayError::Configuration("DISCORD_TOKEN not set".to_string()))?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:nimbus.db?mode=rwc".to_string());

        let token_ceiling = env::var("NIMBUS_TOKEN_CEILING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_CEILING);

        Ok(Self {
            discord_token,
            database_url,
            token_ceiling,
        })
    }
}
