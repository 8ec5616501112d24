//! Error types for tool operations.

use thiserror::Error;

/// Errors that can occur during tool execution.
///
/// These never escape the dispatcher; [`crate::ToolRegistry::dispatch`]
/// converts them into user-visible result strings.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The model supplied arguments that do not match the tool's schema.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Persistence failure while reading or logging.
    #[error("database error: {0}")]
    Database(#[from] database::DatabaseError),

    /// General execution error.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
