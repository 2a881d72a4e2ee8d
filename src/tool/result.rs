// ABOUTME: Defines the ToolResult type - a JSON value handed back to the agent,
// ABOUTME: with error results shaped as {"error": message}.

use serde::Serialize;
use serde_json::Value;

/// Result of a tool execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// The JSON-serializable output.
    pub value: Value,

    /// Whether this result represents an error.
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result from a JSON value.
    pub fn json(value: Value) -> Self {
        Self {
            value,
            is_error: false,
        }
    }

    /// Create a successful result from any serializable value.
    pub fn from_serialize(value: &impl Serialize) -> Result<Self, serde_json::Error> {
        Ok(Self::json(serde_json::to_value(value)?))
    }

    /// Create an error result: `{"error": message}`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            value: serde_json::json!({ "error": message.into() }),
            is_error: true,
        }
    }

    /// Compact JSON text of the value, as fed back into the pipeline.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.value)
    }
}

impl Default for ToolResult {
    fn default() -> Self {
        Self::json(Value::Null)
    }
}
