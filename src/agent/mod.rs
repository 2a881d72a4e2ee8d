// ABOUTME: Agent module - descriptors, shared context, response envelopes,
// ABOUTME: callbacks, prompt assembly, and sequential sub-agent execution.

mod callback;
mod context;
mod definition;
mod envelope;
mod execute;
mod prompt;

pub use callback::{AfterAgentCallback, CallbackContext, CallbackOutcome, suppress_output};
pub use context::Context;
pub use definition::{Agent, GenerationConfig};
pub use envelope::{AgentResponse, Outcome};
