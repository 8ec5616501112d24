//! Error types for the turn loop.

use std::time::Duration;

use thiserror::Error;

use bot_core::{ModelError, PlatformError};
use memory::MemoryError;

/// Errors that can occur inside one conversation turn.
///
/// These never escape [`crate::Orchestrator::handle_message`]; the outermost
/// boundary converts any of them into a user-visible apology.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Conversation memory failure.
    #[error("memory error: {0}")]
    Memory(#[from] MemoryError),

    /// Model backend failure.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Outbound delivery failure.
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    /// The model call exceeded its deadline.
    #[error("model call timed out after {0:?}")]
    ModelTimeout(Duration),
}
