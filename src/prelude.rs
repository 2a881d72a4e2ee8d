// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use exam_profiler::prelude::*;` to get started quickly.

pub use crate::agent::{
    AfterAgentCallback, Agent, AgentResponse, CallbackContext, CallbackOutcome, Context,
    GenerationConfig, Outcome, suppress_output,
};
pub use crate::config::{PathConfig, ProfilerConfig};
pub use crate::error::{AgentError, ConfigError, LlmError, ProfilerError, RunnerError, ToolError};
pub use crate::llm::{
    ContentBlock, GeminiClient, LlmClient, Message, Request, Response, Role, StopReason,
    ToolDefinition, Usage,
};
pub use crate::profiler::build_profiler_agent;
pub use crate::runner::{Event, EventStream, InMemorySessionService, Runner, Session, SessionKey};
pub use crate::tool::{FunctionTool, Registry, Tool, ToolResult};
pub use crate::tools::{
    AnalyzeStatisticsTool, CompareExamsTool, ListExamsTool, ReadPdfTool, VisualizeTrendsTool,
};
