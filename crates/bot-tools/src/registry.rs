//! Tool registry and dispatcher.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, warn};

use bot_core::{CallerContext, ToolDescriptor};

use crate::tool::Tool;

/// Registry of callable tools.
///
/// Holds tools in registration order, produces the privilege-filtered
/// descriptor list for the model, and dispatches invocations by exact name.
/// Dispatch always returns a result string; a bad or hallucinated tool call
/// can never abort the conversation turn.
pub struct ToolRegistry {
    /// Registered tools by name, in registration order.
    tools: IndexMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            tools: IndexMap::new(),
        }
    }

    /// Register a tool.
    ///
    /// If a tool with the same name already exists, it will be replaced.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        info!("Registering tool: {}", name);
        self.tools.insert(name, Arc::new(tool));
    }

    /// Check if a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// The descriptor list advertised to the model for a caller.
    ///
    /// Universally visible tools always appear; admin tools appear only for
    /// privileged callers. This list is advisory - handlers re-check
    /// privilege on execution.
    pub fn descriptors(&self, is_admin: bool) -> Vec<ToolDescriptor> {
        self.tools
            .values()
            .filter(|tool| is_admin || !tool.requires_admin())
            .map(|tool| tool.descriptor())
            .collect()
    }

    /// Dispatch one tool invocation and return the result text.
    ///
    /// Lookup is by exact name among tools visible to the caller. Unknown
    /// names, unparseable argument JSON, and handler errors each degrade to
    /// a descriptive string.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments_json: &str,
        caller: &CallerContext,
    ) -> String {
        let tool = self
            .tools
            .get(name)
            .filter(|tool| caller.is_admin || !tool.requires_admin());

        let Some(tool) = tool else {
            warn!(tool = name, "Model requested an unavailable tool");
            return format!("Tool '{}' is not available.", name);
        };

        let args: Value = if arguments_json.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            match serde_json::from_str(arguments_json) {
                Ok(value) => value,
                Err(e) => {
                    warn!(tool = name, "Malformed tool arguments: {}", e);
                    return format!("Error executing tool '{}': invalid arguments: {}", name, e);
                }
            }
        };

        debug!(tool = name, caller = caller.caller_id, "Dispatching tool");

        match tool.execute(caller, args).await {
            Ok(output) => {
                debug!(
                    tool = name,
                    success = output.success,
                    content_len = output.content.len(),
                    "Tool completed"
                );
                output.content
            }
            Err(e) => {
                warn!(tool = name, "Tool failed: {}", e);
                format!("Error executing tool '{}': {}", name, e)
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use crate::tool::ToolOutput;
    use async_trait::async_trait;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes back the input"
        }

        fn parameters(&self) -> Value {
            serde_json::json!({
                "type": "object",
                "properties": { "message": { "type": "string" } },
                "required": ["message"]
            })
        }

        async fn execute(
            &self,
            _caller: &CallerContext,
            args: Value,
        ) -> Result<ToolOutput, ToolError> {
            let message = args
                .get("message")
                .and_then(Value::as_str)
                .ok_or_else(|| ToolError::InvalidArguments("missing 'message'".to_string()))?;
            Ok(ToolOutput::success(message))
        }
    }

    struct AdminOnlyTool;

    #[async_trait]
    impl Tool for AdminOnlyTool {
        fn name(&self) -> &str {
            "admin_only"
        }

        fn description(&self) -> &str {
            "Visible to admins"
        }

        fn parameters(&self) -> Value {
            serde_json::json!({ "type": "object", "properties": {} })
        }

        fn requires_admin(&self) -> bool {
            true
        }

        async fn execute(
            &self,
            _caller: &CallerContext,
            _args: Value,
        ) -> Result<ToolOutput, ToolError> {
            Ok(ToolOutput::success("done"))
        }
    }

    fn caller(is_admin: bool) -> CallerContext {
        CallerContext {
            guild_id: 1,
            channel_id: 2,
            caller_id: 3,
            caller_name: "Alice".to_string(),
            is_admin,
        }
    }

    fn test_registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);
        registry.register(AdminOnlyTool);
        registry
    }

    #[test]
    fn test_descriptors_filtered_by_privilege() {
        let registry = test_registry();

        let everyone: Vec<String> = registry
            .descriptors(false)
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(everyone, vec!["echo"]);

        let admin: Vec<String> = registry
            .descriptors(true)
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(admin, vec!["echo", "admin_only"]);
    }

    #[tokio::test]
    async fn test_dispatch_success() {
        let registry = test_registry();
        let result = registry
            .dispatch("echo", r#"{"message": "hello"}"#, &caller(false))
            .await;
        assert_eq!(result, "hello");
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool_returns_string() {
        let registry = test_registry();
        let result = registry
            .dispatch("nonexistent_tool", "{}", &caller(true))
            .await;
        assert_eq!(result, "Tool 'nonexistent_tool' is not available.");
    }

    #[tokio::test]
    async fn test_dispatch_admin_tool_hidden_from_regular_caller() {
        let registry = test_registry();
        let result = registry.dispatch("admin_only", "{}", &caller(false)).await;
        assert!(result.contains("not available"));

        let result = registry.dispatch("admin_only", "{}", &caller(true)).await;
        assert_eq!(result, "done");
    }

    #[tokio::test]
    async fn test_dispatch_malformed_json_returns_string() {
        let registry = test_registry();
        let result = registry
            .dispatch("echo", "{not json", &caller(false))
            .await;
        assert!(result.starts_with("Error executing tool 'echo'"));
    }

    #[tokio::test]
    async fn test_dispatch_handler_error_returns_string() {
        let registry = test_registry();
        // Valid JSON, wrong shape for the tool
        let result = registry.dispatch("echo", r#"{"wrong": 1}"#, &caller(false)).await;
        assert!(result.starts_with("Error executing tool 'echo'"));
        assert!(result.contains("missing 'message'"));
    }

    #[tokio::test]
    async fn test_dispatch_empty_arguments_ok() {
        let registry = test_registry();
        let result = registry.dispatch("admin_only", "", &caller(true)).await;
        assert_eq!(result, "done");
    }
}
