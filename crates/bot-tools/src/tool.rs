//! Tool trait definition and output type.

use async_trait::async_trait;
use serde_json::Value;

use bot_core::{CallerContext, ToolDescriptor};

use crate::error::ToolError;

/// Output from a tool execution.
///
/// Both outcomes carry a user-facing string; `success` exists for logging
/// and the audit trail, not for control flow.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// The result text sent back to the channel.
    pub content: String,
    /// Whether the underlying action was performed.
    pub success: bool,
}

impl ToolOutput {
    /// Create a successful output.
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: true,
        }
    }

    /// Create a failed (denial, refusal, or error report) output.
    pub fn failure(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: false,
        }
    }
}

/// Trait for tools the model can invoke.
///
/// A tool invocation always terminates in a result string: privilege
/// denials, unresolvable targets, and platform failures are all `Ok`
/// outputs with report text. `Err` is reserved for conditions the
/// dispatcher should describe generically (bad arguments, I/O failures).
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's unique name (used for dispatch).
    fn name(&self) -> &str;

    /// Human-readable description handed to the model.
    fn description(&self) -> &str;

    /// JSON Schema object for the tool's parameters.
    fn parameters(&self) -> Value;

    /// Whether the tool is only visible to privileged callers.
    fn requires_admin(&self) -> bool {
        false
    }

    /// Execute the tool with pre-parsed argument JSON.
    async fn execute(&self, caller: &CallerContext, args: Value) -> Result<ToolOutput, ToolError>;

    /// The descriptor advertised to the model for this tool.
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}
