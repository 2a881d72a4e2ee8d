// ABOUTME: AgentResponse - the envelope every agent invocation returns,
// ABOUTME: carrying either a response or an error, never both.

use serde::Serialize;

/// Outcome of one agent invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Response(String),
    Error(String),
}

/// Envelope returned by `Agent::run`.
///
/// Serializes to `{"agent", "response" | "error", "output_key"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentResponse {
    pub agent: String,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub output_key: Option<String>,
    /// Set when an after-agent callback hid the response. The parent's
    /// transcript leaves suppressed sub-agents out.
    #[serde(skip)]
    pub suppressed: bool,
}

impl AgentResponse {
    pub fn success(
        agent: impl Into<String>,
        response: impl Into<String>,
        output_key: Option<String>,
    ) -> Self {
        Self {
            agent: agent.into(),
            outcome: Outcome::Response(response.into()),
            output_key,
            suppressed: false,
        }
    }

    /// A successful invocation whose visible response was hidden.
    pub fn suppressed(agent: impl Into<String>, output_key: Option<String>) -> Self {
        Self {
            suppressed: true,
            ..Self::success(agent, String::new(), output_key)
        }
    }

    pub fn failure(
        agent: impl Into<String>,
        error: impl Into<String>,
        output_key: Option<String>,
    ) -> Self {
        Self {
            agent: agent.into(),
            outcome: Outcome::Error(error.into()),
            output_key,
            suppressed: false,
        }
    }

    pub fn response(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Response(text) => Some(text),
            Outcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Error(message) => Some(message),
            Outcome::Response(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }

    /// The response text, or empty for errors.
    pub fn text(&self) -> &str {
        self.response().unwrap_or_default()
    }
}
