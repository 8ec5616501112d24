//! Nimbus composition root.
//!
//! Builds every component once at startup, injects the collaborators
//! explicitly, and runs the Discord gateway.

use std::sync::Arc;

use serenity::http::Http;
use serenity::prelude::GatewayIntents;
use serenity::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bot_tools::{ActivityTool, BanTool, CreateChannelTool, KickTool, SearchTool, ToolRegistry};
use database::Database;
use discord_gateway::{AdminCommands, DiscordApi, GatewayConfig, Handler};
use memory::{ConversationMemory, TokenAccountant};
use model_client::{ModelClient, ModelConfig};
use orchestrator::Orchestrator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GatewayConfig::from_env()?;

    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let memory = Arc::new(ConversationMemory::new(
        db.clone(),
        TokenAccountant::new(config.token_ceiling),
    ));

    let model_config = ModelConfig::from_env()?;
    let system_prompt = model_config.system_prompt.clone();
    let model = Arc::new(ModelClient::new(model_config)?);

    // Standalone HTTP client for moderation calls and outbound messages,
    // shared with the tool handlers.
    let http = Arc::new(Http::new(&config.discord_token));
    let current_user = http.get_current_user().await?;
    let bot_user_id = current_user.id.get();
    let bot_name = current_user.name.clone();
    info!("Authenticated as {} ({})", bot_name, bot_user_id);

    let api = Arc::new(DiscordApi::new(http, bot_user_id));

    let mut registry = ToolRegistry::new();
    registry.register(SearchTool::from_env());
    registry.register(KickTool::new(api.clone(), db.clone()));
    registry.register(BanTool::new(api.clone(), db.clone()));
    registry.register(CreateChannelTool::new(api.clone(), db.clone()));
    registry.register(ActivityTool::new(db.clone()));

    let orchestrator = Arc::new(Orchestrator::new(
        memory.clone(),
        Arc::new(registry),
        model,
        api.clone(),
        system_prompt,
        bot_user_id,
        bot_name.clone(),
    ));

    let handler = Handler::new(
        orchestrator,
        api,
        AdminCommands::new(memory, db),
        bot_user_id,
    );

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await?;

    info!("Starting gateway");
    client.start().await?;

    Ok(())
}
