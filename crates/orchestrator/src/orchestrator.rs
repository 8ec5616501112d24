//! The turn loop itself.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, error, info};

use bot_core::{ChatMessage, InboundMessage, LanguageModel, Messenger};
use bot_tools::ToolRegistry;
use memory::{ConversationMemory, TurnRole};

use crate::error::OrchestratorError;
use crate::formatting::chunk_message;

/// Default deadline for one model call.
const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of history turns pulled into the prompt.
const DEFAULT_CONTEXT_TURNS: i64 = 50;

/// Drives one conversation turn per inbound message.
///
/// Constructed once at startup with every collaborator it needs; nothing is
/// looked up at call time.
pub struct Orchestrator {
    memory: Arc<ConversationMemory>,
    registry: Arc<ToolRegistry>,
    model: Arc<dyn LanguageModel>,
    messenger: Arc<dyn Messenger>,
    system_prompt: String,
    bot_user_id: u64,
    bot_name: String,
    model_timeout: Duration,
    max_context_turns: i64,
}

impl Orchestrator {
    /// Create an orchestrator wired to its collaborators.
    pub fn new(
        memory: Arc<ConversationMemory>,
        registry: Arc<ToolRegistry>,
        model: Arc<dyn LanguageModel>,
        messenger: Arc<dyn Messenger>,
        system_prompt: impl Into<String>,
        bot_user_id: u64,
        bot_name: impl Into<String>,
    ) -> Self {
        Self {
            memory,
            registry,
            model,
            messenger,
            system_prompt: system_prompt.into(),
            bot_user_id,
            bot_name: bot_name.into(),
            model_timeout: DEFAULT_MODEL_TIMEOUT,
            max_context_turns: DEFAULT_CONTEXT_TURNS,
        }
    }

    /// Override the model-call deadline.
    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }

    /// The conversation memory in use.
    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Handle one inbound message; never returns an error.
    ///
    /// This is the outermost boundary: any failure inside the turn is logged
    /// and converted into a single apology message.
    pub async fn handle_message(&self, message: &InboundMessage) {
        if let Err(e) = self.run_turn(message).await {
            error!(
                channel_id = message.channel_id,
                author = %message.author_name,
                "Turn failed: {}",
                e
            );
            let apology = format!(
                "Sorry {}, I encountered an error processing your message. Please try again.",
                message.author_name
            );
            if let Err(send_err) = self.messenger.send(message.channel_id, &apology).await {
                error!("Failed to deliver apology: {}", send_err);
            }
        }
    }

    async fn run_turn(&self, message: &InboundMessage) -> Result<(), OrchestratorError> {
        let user_content = self.build_user_content(message);

        debug!(
            channel_id = message.channel_id,
            author = %message.author_name,
            "Processing message: {}",
            user_content
        );

        let mut messages = self
            .memory
            .get_context(message.guild_id, message.channel_id, self.max_context_turns)
            .await?;
        messages.push(ChatMessage::user(format!(
            "[{}]: {}",
            message.author_name, user_content
        )));

        let tools = self.registry.descriptors(message.is_admin);

        let reply = timeout(
            self.model_timeout,
            self.model.complete(&self.system_prompt, &messages, &tools),
        )
        .await
        .map_err(|_| OrchestratorError::ModelTimeout(self.model_timeout))??;

        // Dispatch tool calls in the order received, streaming each result
        // to the channel as it completes.
        let caller = message.caller();
        for call in &reply.tool_calls {
            info!(tool = %call.name, channel_id = message.channel_id, "Executing tool call");
            let result = self
                .registry
                .dispatch(&call.name, &call.arguments_json, &caller)
                .await;
            if !result.trim().is_empty() {
                self.send_chunked(message.channel_id, &result).await?;
            }
        }

        self.memory
            .record_turn(
                message.guild_id,
                message.channel_id,
                message.author_id,
                &message.author_name,
                TurnRole::User,
                &user_content,
            )
            .await?;

        if let Some(text) = reply.text.as_deref() {
            self.memory
                .record_turn(
                    message.guild_id,
                    message.channel_id,
                    self.bot_user_id,
                    &self.bot_name,
                    TurnRole::Assistant,
                    text,
                )
                .await?;
            self.send_chunked(message.channel_id, text).await?;
        }

        Ok(())
    }

    /// Assemble the user-turn content from the raw inbound message.
    fn build_user_content(&self, message: &InboundMessage) -> String {
        let mention = format!("<@{}>", self.bot_user_id);
        let nick_mention = format!("<@!{}>", self.bot_user_id);

        let mut content = message
            .text
            .replace(&mention, "")
            .replace(&nick_mention, "")
            .trim()
            .to_string();

        if let Some(ref quoted) = message.replied_to {
            content = format!(
                "[Context - replying to message from {}]: \"{}\"\n\n{}",
                quoted.author_name, quoted.text, content
            );
        }

        if message.image_count > 0 {
            content.push_str(&format!(
                "\n\n[User attached {} image(s)]",
                message.image_count
            ));
        }

        content
    }

    async fn send_chunked(&self, channel_id: u64, text: &str) -> Result<(), OrchestratorError> {
        for chunk in chunk_message(text) {
            self.messenger.send(channel_id, &chunk).await?;
        }
        Ok(())
    }
}
