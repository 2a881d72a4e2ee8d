// ABOUTME: Defines the LlmClient trait - the single protocol boundary between
// ABOUTME: agents and the model backend.

use async_trait::async_trait;

use super::{Request, Response};
use crate::error::LlmError;

/// Trait for LLM client implementations.
///
/// One call is one round trip: a request goes out, either text or a
/// function call comes back.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Create a message (non-streaming).
    async fn create_message(&self, req: &Request) -> Result<Response, LlmError>;

    /// Whether this backend can serve the given model identifier.
    fn supports_model(&self, model: &str) -> bool {
        !model.is_empty()
    }
}
