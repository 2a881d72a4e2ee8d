// ABOUTME: Agent descriptor - identity, model, instructions, generation
// ABOUTME: parameters, tools, sub-agents, and the backend attachment step.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::callback::{AfterAgentCallback, CallbackContext, CallbackOutcome};
use crate::error::AgentError;
use crate::llm::LlmClient;
use crate::tool::{Registry, Tool};

/// Sampling parameters sent with every backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 2048,
        }
    }
}

/// A named unit that turns a prompt and a shared context into a response,
/// through one model call, an optional tool call, and sequential
/// delegation to its sub-agents.
pub struct Agent {
    /// Unique within a pipeline.
    pub name: String,

    /// Backend model identifier (e.g. "gemini-2.5-flash").
    pub model: String,

    /// Role summary, rendered as "Role: ..." in the system instruction.
    pub description: String,

    /// Behavioral directive, rendered as "Instructions: ...".
    pub instruction: String,

    pub generation: GenerationConfig,

    pub tools: Registry,

    /// Run in this order after the agent's own model call.
    pub sub_agents: Vec<Agent>,

    /// Context key this agent's full result is stored under.
    pub output_key: Option<String>,

    pub after_agent_callback: Option<AfterAgentCallback>,

    client: Option<Arc<dyn LlmClient>>,
}

impl Agent {
    /// Create a new agent with required fields.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            description: String::new(),
            instruction: String::new(),
            generation: GenerationConfig::default(),
            tools: Registry::new(),
            sub_agents: Vec::new(),
            output_key: None,
            after_agent_callback: None,
            client: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.generation.temperature = temperature;
        self
    }

    pub fn top_p(mut self, top_p: f64) -> Self {
        self.generation.top_p = top_p;
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self {
        self.generation.top_k = top_k;
        self
    }

    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.generation.max_output_tokens = max_output_tokens;
        self
    }

    /// Register a tool the model may call.
    pub fn tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.register(tool);
        self
    }

    pub fn tool_arc(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.register_arc(tool);
        self
    }

    /// Append a sub-agent to the delegation chain.
    pub fn sub_agent(mut self, agent: Agent) -> Self {
        self.sub_agents.push(agent);
        self
    }

    pub fn sub_agents(mut self, agents: impl IntoIterator<Item = Agent>) -> Self {
        self.sub_agents.extend(agents);
        self
    }

    pub fn output_key(mut self, key: impl Into<String>) -> Self {
        self.output_key = Some(key.into());
        self
    }

    pub fn after_agent_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&CallbackContext<'_>) -> CallbackOutcome + Send + Sync + 'static,
    {
        self.after_agent_callback = Some(Arc::new(callback));
        self
    }

    /// Attach `client` to this agent and every sub-agent, after checking
    /// the whole tree: names set and unique among siblings, tool names unique per agent,
    /// models served by `client`.
    pub fn initialize(&mut self, client: Arc<dyn LlmClient>) -> Result<(), AgentError> {
        self.validate(client.as_ref())?;
        self.attach(client);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.client.is_some()
    }

    /// Direct sub-agent by name.
    pub fn find_sub_agent(&self, name: &str) -> Option<&Agent> {
        self.sub_agents.iter().find(|a| a.name == name)
    }

    pub(super) fn client(&self) -> Result<&Arc<dyn LlmClient>, AgentError> {
        self.client
            .as_ref()
            .ok_or_else(|| AgentError::NotInitialized(self.name.clone()))
    }

    fn validate(&self, client: &dyn LlmClient) -> Result<(), AgentError> {
        if self.name.trim().is_empty() {
            return Err(AgentError::Validation("agent name must be set".into()));
        }
        if !client.supports_model(&self.model) {
            return Err(AgentError::UnsupportedModel {
                agent: self.name.clone(),
                model: self.model.clone(),
            });
        }
        if let Some(tool) = self.tools.duplicate_names().first() {
            return Err(AgentError::Validation(format!(
                "duplicate tool '{tool}' on '{}'",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for sub_agent in &self.sub_agents {
            if !seen.insert(sub_agent.name.as_str()) {
                return Err(AgentError::Validation(format!(
                    "duplicate sub-agent '{}' under '{}'",
                    sub_agent.name, self.name
                )));
            }
            sub_agent.validate(client)?;
        }
        Ok(())
    }

    fn attach(&mut self, client: Arc<dyn LlmClient>) {
        for sub_agent in &mut self.sub_agents {
            sub_agent.attach(Arc::clone(&client));
        }
        self.client = Some(client);
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("tools", &self.tools)
            .field(
                "sub_agents",
                &self.sub_agents.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
            )
            .field("output_key", &self.output_key)
            .finish()
    }
}
