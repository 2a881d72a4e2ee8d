// ABOUTME: Defines the Tool trait - the one interface every callable exposed
// ABOUTME: to the model implements: name, description, schema, async execute.

use async_trait::async_trait;

use super::ToolResult;
use crate::llm::ToolDefinition;

/// A tool that can be executed by an agent.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name of this tool.
    fn name(&self) -> &str;

    /// Returns a human-readable description for the LLM.
    fn description(&self) -> &str;

    /// Returns the JSON Schema for the tool's input parameters.
    fn schema(&self) -> serde_json::Value;

    /// The function declaration sent to the backend. Tools that return
    /// `None` stay callable by name but are not advertised.
    fn declaration(&self) -> Option<ToolDefinition> {
        Some(ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.schema(),
        })
    }

    /// Execute the tool with the given keyword arguments.
    ///
    /// Expected failures (missing file, bad input) should come back as
    /// `ToolResult::error`; `Err` is reserved for the tool itself breaking.
    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error>;
}
