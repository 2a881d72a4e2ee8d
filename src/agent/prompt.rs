// ABOUTME: Prompt assembly - system instruction, context block, and the
// ABOUTME: backend request an agent sends for one invocation.

use serde_json::Value;

use super::{Agent, Context};
use crate::llm::{Message, Request};

impl Agent {
    /// Role, instructions, tool names, and sub-agent names, each section
    /// present only when non-empty, separated by a blank line.
    pub fn system_instruction(&self) -> String {
        let mut parts = Vec::new();

        if !self.description.is_empty() {
            parts.push(format!("Role: {}", self.description));
        }
        if !self.instruction.is_empty() {
            parts.push(format!("Instructions: {}", self.instruction));
        }
        if !self.tools.is_empty() {
            parts.push(format!("Available tools: {}", self.tools.names().join(", ")));
        }
        if !self.sub_agents.is_empty() {
            let names: Vec<_> = self.sub_agents.iter().map(|a| a.name.as_str()).collect();
            parts.push(format!("Sub-agents: {}", names.join(", ")));
        }

        parts.join("\n\n")
    }

    /// The prompt followed by a `Context:` block, one line per entry.
    pub fn full_prompt(&self, prompt: &str, context: &Context) -> String {
        if context.is_empty() {
            return prompt.to_string();
        }

        let mut full = format!("{prompt}\n\nContext:\n");
        for (key, value) in context.iter() {
            full.push_str(&format!("- {key}: {}\n", render_value(value)));
        }
        full
    }

    /// The single backend request for `prompt`.
    pub fn build_request(&self, prompt: &str, context: &Context) -> Request {
        let mut request = Request::new(&self.model)
            .message(Message::user(self.full_prompt(prompt, context)))
            .temperature(self.generation.temperature)
            .top_p(self.generation.top_p)
            .top_k(self.generation.top_k)
            .max_tokens(self.generation.max_output_tokens)
            .tools(self.tools.to_definitions());

        let system = self.system_instruction();
        if !system.is_empty() {
            request = request.system(system);
        }
        request
    }
}

/// Objects and arrays as indented JSON, strings bare, other scalars as
/// their JSON text.
fn render_value(value: &Value) -> String {
    match value {
        Value::Object(_) | Value::Array(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
