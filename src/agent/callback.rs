// ABOUTME: After-agent callbacks - post-process an agent's response before it
// ABOUTME: is returned, e.g. hiding intermediate output from the user.

use std::sync::Arc;

use super::{Agent, Context};

/// What a callback sees.
pub struct CallbackContext<'a> {
    pub agent: &'a Agent,
    /// The response after sub-agent delegation, before the callback.
    pub response: &'a str,
    pub context: &'a Context,
}

/// What a callback decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Leave the response as is.
    Keep,
    /// Replace the visible response. Empty text counts as `Keep`.
    Replace(String),
    /// Hide the response from display. The full text has already been
    /// stored in the context under the agent's output key.
    Suppress,
}

pub type AfterAgentCallback = Arc<dyn Fn(&CallbackContext<'_>) -> CallbackOutcome + Send + Sync>;

/// Callback that hides an intermediate stage's output from the final
/// transcript.
pub fn suppress_output(_ctx: &CallbackContext<'_>) -> CallbackOutcome {
    CallbackOutcome::Suppress
}
