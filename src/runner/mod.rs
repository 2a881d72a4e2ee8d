// ABOUTME: Runner - drives one top-level agent invocation per user message
// ABOUTME: and surfaces the result as a single final event.

mod session;

pub use session::{InMemorySessionService, Session, SessionKey};

use std::pin::Pin;
use std::sync::Arc;

use futures::Stream;
use tracing::{info, warn};

use crate::agent::{Agent, AgentResponse};
use crate::error::RunnerError;
use crate::llm::Message;

/// What the runner yields to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Name of the agent that produced the event.
    pub author: String,
    /// Response text; empty when the invocation failed.
    pub text: String,
    /// Error message from the agent's envelope, if any.
    pub error: Option<String>,
    pub is_final: bool,
}

impl Event {
    /// The terminal event for an agent's envelope.
    pub fn final_from(envelope: AgentResponse) -> Self {
        let text = envelope.text().to_string();
        let error = envelope.error().map(str::to_string);
        Self {
            author: envelope.agent,
            text,
            error,
            is_final: true,
        }
    }

    pub fn is_final_response(&self) -> bool {
        self.is_final
    }
}

pub type EventStream = Pin<Box<dyn Stream<Item = Result<Event, RunnerError>> + Send + 'static>>;

/// Runs a root agent against sessions of one app.
#[derive(Clone)]
pub struct Runner {
    app_name: String,
    agent: Arc<Agent>,
    sessions: InMemorySessionService,
}

impl Runner {
    /// `agent` should already be initialized with a backend client.
    pub fn new(app_name: impl Into<String>, agent: Arc<Agent>, sessions: InMemorySessionService) -> Self {
        Self {
            app_name: app_name.into(),
            agent,
            sessions,
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Run the root agent on `message`.
    ///
    /// Nothing happens until the stream is polled. The stream yields exactly
    /// one item and cannot be restarted; call `run` again for a new
    /// invocation. Each invocation gets its own context, seeded from the
    /// session's state.
    pub fn run(&self, user_id: &str, session_id: &str, message: Message) -> EventStream {
        let app_name = self.app_name.clone();
        let user_id = user_id.to_string();
        let session_id = session_id.to_string();
        let agent = Arc::clone(&self.agent);
        let sessions = self.sessions.clone();

        Box::pin(async_stream::try_stream! {
            let session = sessions
                .get_session(&app_name, &user_id, &session_id)
                .await
                .ok_or_else(|| RunnerError::SessionNotFound {
                    app: app_name.clone(),
                    user: user_id.clone(),
                    session: session_id.clone(),
                })?;
            let prompt = message.first_text().ok_or(RunnerError::EmptyMessage)?;

            info!(app = %app_name, user = %user_id, session_id = %session_id, agent = %agent.name, "run started");
            let mut context = session.state.clone();
            let envelope = agent.run(prompt, &mut context).await;

            if let Some(error) = envelope.error() {
                warn!(session_id = %session_id, error, "run finished with agent error");
            } else {
                info!(session_id = %session_id, "run finished");
            }
            yield Event::final_from(envelope);
        })
    }
}
