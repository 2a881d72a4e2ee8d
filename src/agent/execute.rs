// ABOUTME: Agent execution - one backend call, optional tool dispatch,
// ABOUTME: sequential sub-agent delegation, and the after-agent callback.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use tracing::{Instrument, debug, info, info_span, warn};

use super::callback::{CallbackContext, CallbackOutcome};
use super::{Agent, AgentResponse, Context, Outcome};
use crate::error::{AgentError, ToolError};
use crate::llm::Response;
use crate::tool::ToolResult;

impl Agent {
    /// Run the agent on `prompt` with the caller's context.
    ///
    /// Never fails: any error along the way is reported in the returned
    /// envelope. The context is shared with every sub-agent and gains an
    /// entry under each output key reached along the way.
    pub fn run<'a>(&'a self, prompt: &'a str, context: &'a mut Context) -> BoxFuture<'a, AgentResponse> {
        let span = info_span!("agent", agent = %self.name, model = %self.model);
        async move {
            debug!(prompt_chars = prompt.len(), context_keys = context.len(), "agent run started");
            match self.execute(prompt, context).await {
                Ok(Some(response)) => {
                    info!(response_chars = response.len(), "agent run finished");
                    AgentResponse::success(&self.name, response, self.output_key.clone())
                }
                Ok(None) => {
                    info!("agent run finished with output suppressed");
                    AgentResponse::suppressed(&self.name, self.output_key.clone())
                }
                Err(err) => {
                    warn!(error = %err, "agent run failed");
                    AgentResponse::failure(&self.name, err.to_string(), self.output_key.clone())
                }
            }
        }
        .instrument(span)
        .boxed()
    }

    /// `None` when the after-agent callback suppressed the response.
    async fn execute(&self, prompt: &str, context: &mut Context) -> Result<Option<String>, AgentError> {
        let client = self.client()?;

        let request = self.build_request(prompt, context);
        let response = client.create_message(&request).await?;
        let initial = self.interpret(&response).await?;

        let output = if self.sub_agents.is_empty() {
            initial
        } else {
            self.delegate(&initial, context).await?
        };

        if let Some(key) = &self.output_key {
            context.insert(key.clone(), output.clone());
        }

        Ok(self.apply_callback(output, context))
    }

    /// First function call wins; otherwise the first text part; otherwise
    /// nothing.
    async fn interpret(&self, response: &Response) -> Result<String, AgentError> {
        if let Some((name, args)) = response.first_tool_use() {
            return self.execute_tool_call(name, args.clone()).await;
        }
        Ok(response.first_text().unwrap_or_default().to_string())
    }

    /// Unknown tools resolve to `{"error": "Tool <name> not found"}` rather
    /// than failing the agent.
    async fn execute_tool_call(&self, name: &str, args: Value) -> Result<String, AgentError> {
        let args = if args.is_null() {
            Value::Object(Default::default())
        } else {
            args
        };

        let result = match self.tools.get(name) {
            Some(tool) => {
                info!(tool = name, "executing tool call");
                tool.execute(args).await.map_err(ToolError::Execution)?
            }
            None => {
                warn!(tool = name, "model requested unregistered tool");
                ToolResult::error(format!("Tool {name} not found"))
            }
        };

        if result.is_error {
            debug!(tool = name, "tool returned an error result");
        }
        Ok(result.to_json_string()?)
    }

    /// Run sub-agents in order, each on the parent's own response, and
    /// build the labeled transcript. Suppressed sub-agents are left out;
    /// an empty but visible response still gets its header. A failing
    /// sub-agent ends the chain.
    async fn delegate(&self, parent_response: &str, context: &mut Context) -> Result<String, AgentError> {
        let mut sections = vec![format!("[{} Initial Response]\n{}", self.name, parent_response)];

        for sub_agent in &self.sub_agents {
            let result = sub_agent.run(parent_response, context).await;
            if result.suppressed {
                debug!(sub_agent = %sub_agent.name, "sub-agent output hidden from transcript");
                continue;
            }
            match result.outcome {
                Outcome::Error(message) => {
                    return Err(AgentError::SubAgent {
                        name: sub_agent.name.clone(),
                        message,
                    });
                }
                Outcome::Response(text) => {
                    sections.push(format!("\n[{} Response]\n{}", sub_agent.name, text));
                }
            }
        }

        Ok(sections.join("\n"))
    }

    fn apply_callback(&self, response: String, context: &Context) -> Option<String> {
        let Some(callback) = &self.after_agent_callback else {
            return Some(response);
        };

        let ctx = CallbackContext {
            agent: self,
            response: &response,
            context,
        };
        match callback(&ctx) {
            CallbackOutcome::Keep => Some(response),
            CallbackOutcome::Replace(text) if text.is_empty() => Some(response),
            CallbackOutcome::Replace(text) => Some(text),
            CallbackOutcome::Suppress => None,
        }
    }
}
