// ABOUTME: FunctionTool - adapts a plain synchronous closure into the Tool trait.
// ABOUTME: Lets ad-hoc callables join an agent without a dedicated struct.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{Tool, ToolResult};
use crate::llm::ToolDefinition;

type ToolFn = dyn Fn(Value) -> Result<Value, anyhow::Error> + Send + Sync;

/// A tool backed by a closure taking the call's keyword arguments.
///
/// Without a schema the tool is not declared to the backend.
#[derive(Clone)]
pub struct FunctionTool {
    name: String,
    description: String,
    schema: Option<Value>,
    func: Arc<ToolFn>,
}

impl FunctionTool {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, func: F) -> Self
    where
        F: Fn(Value) -> Result<Value, anyhow::Error> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            schema: None,
            func: Arc::new(func),
        }
    }

    /// Attach a parameter schema so the tool is declared to the backend.
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> Value {
        self.schema
            .clone()
            .unwrap_or_else(|| serde_json::json!({ "type": "object", "properties": {} }))
    }

    fn declaration(&self) -> Option<ToolDefinition> {
        let schema = self.schema.clone()?;
        Some(ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: schema,
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let value = (self.func)(params)?;
        let is_error = value
            .as_object()
            .is_some_and(|o| o.len() == 1 && o.get("error").is_some_and(Value::is_string));
        Ok(ToolResult { value, is_error })
    }
}
