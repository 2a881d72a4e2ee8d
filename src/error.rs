// ABOUTME: Defines all error types for the profiler using thiserror.
// ABOUTME: Each subsystem has its own error enum, unified under ProfilerError.

/// Top-level error type for the profiler.
#[derive(Debug, thiserror::Error)]
pub enum ProfilerError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Runner error: {0}")]
    Runner(#[from] RunnerError),
}

/// Errors from LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Errors from tool operations.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Execution failed: {0}")]
    Execution(#[source] anyhow::Error),
}

/// Errors raised inside an agent invocation.
///
/// These never escape `Agent::run`; they are folded into the error
/// variant of the response envelope.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("agent '{0}' not initialized with client")]
    NotInitialized(String),

    #[error("invalid agent definition: {0}")]
    Validation(String),

    #[error("agent '{agent}' targets unsupported model '{model}'")]
    UnsupportedModel { agent: String, model: String },

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("sub-agent '{name}' failed: {message}")]
    SubAgent { name: String, message: String },

    #[error("failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("GEMINI_API_KEY or GOOGLE_API_KEY environment variable not set")]
    MissingApiKey,
}

/// Errors from the runner and session service.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("session not found: app={app}, user={user}, session={session}")]
    SessionNotFound {
        app: String,
        user: String,
        session: String,
    },

    #[error("message contains no text")]
    EmptyMessage,
}
