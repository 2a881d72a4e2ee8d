// ABOUTME: Google Gemini API client implementation.
// ABOUTME: Implements LlmClient over the generateContent REST endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ContentBlock, Message, Request, Response, Role, StopReason, ToolDefinition, Usage};
use crate::config::ProfilerConfig;
use crate::error::LlmError;

const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API request format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<GeminiTool>,
}

/// Gemini content (message).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// Gemini content part. The wire format distinguishes parts by which key
/// is present (`text` or `functionCall`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeminiPart {
    FunctionCall {
        #[serde(rename = "functionCall")]
        function_call: GeminiFunctionCall,
    },
    Text {
        text: String,
    },
    Other(serde_json::Value),
}

/// Gemini function call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiFunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

/// Gemini generation config.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

/// Gemini tool definition.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiTool {
    pub function_declarations: Vec<GeminiFunctionDeclaration>,
}

/// Gemini function declaration.
#[derive(Debug, Serialize)]
pub struct GeminiFunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Gemini API response format.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    pub usage_metadata: Option<GeminiUsageMetadata>,
}

/// Gemini response candidate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: GeminiContent,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Gemini usage metadata.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiUsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

/// Gemini API error response.
#[derive(Debug, Deserialize)]
pub struct GeminiError {
    pub error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct GeminiErrorDetail {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub status: String,
}

/// Client for the Google Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: GEMINI_DEFAULT_BASE_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Create a client from the process configuration: key, base URL, and
    /// per-call deadline.
    pub fn from_config(config: &ProfilerConfig) -> Result<Self, LlmError> {
        let api_key = config
            .require_api_key()
            .map_err(|e| LlmError::Configuration(e.to_string()))?;
        Self::new(api_key)
            .with_base_url(&config.base_url)
            .with_timeout(config.request_timeout())
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Bound every backend call by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Build the endpoint URL for a given model and method.
    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }
}

impl From<&ToolDefinition> for GeminiFunctionDeclaration {
    fn from(tool: &ToolDefinition) -> Self {
        GeminiFunctionDeclaration {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.input_schema.clone(),
        }
    }
}

fn convert_message_to_content(msg: &Message) -> GeminiContent {
    let role = match msg.role {
        Role::User => "user",
        Role::Assistant => "model",
    };

    let parts = msg
        .content
        .iter()
        .map(|block| match block {
            ContentBlock::Text { text } => GeminiPart::Text { text: text.clone() },
            ContentBlock::ToolUse { name, input, .. } => GeminiPart::FunctionCall {
                function_call: GeminiFunctionCall {
                    name: name.clone(),
                    args: input.clone(),
                },
            },
        })
        .collect();

    GeminiContent {
        role: Some(role.to_string()),
        parts,
    }
}

impl From<&Request> for GeminiRequest {
    fn from(req: &Request) -> Self {
        let contents = req.messages.iter().map(convert_message_to_content).collect();

        let system_instruction = req.system.as_ref().map(|s| GeminiContent {
            role: None,
            parts: vec![GeminiPart::Text { text: s.clone() }],
        });

        let generation_config = if req.max_tokens.is_some()
            || req.temperature.is_some()
            || req.top_p.is_some()
            || req.top_k.is_some()
        {
            Some(GeminiGenerationConfig {
                max_output_tokens: req.max_tokens,
                temperature: req.temperature,
                top_p: req.top_p,
                top_k: req.top_k,
            })
        } else {
            None
        };

        let tools = if req.tools.is_empty() {
            Vec::new()
        } else {
            vec![GeminiTool {
                function_declarations: req.tools.iter().map(GeminiFunctionDeclaration::from).collect(),
            }]
        };

        GeminiRequest {
            contents,
            system_instruction,
            generation_config,
            tools,
        }
    }
}

fn parse_stop_reason(s: Option<&str>) -> StopReason {
    match s {
        Some("MAX_TOKENS") => StopReason::MaxTokens,
        Some("TOOL_CODE") | Some("FUNCTION_CALL") => StopReason::ToolUse,
        _ => StopReason::EndTurn,
    }
}

fn convert_gemini_response(resp: GeminiResponse, model: String) -> Response {
    let candidate = resp.candidates.into_iter().next();

    let (content, stop_reason) = match candidate {
        Some(c) => {
            let blocks: Vec<ContentBlock> = c
                .content
                .parts
                .into_iter()
                .filter_map(|part| match part {
                    GeminiPart::Text { text } => Some(ContentBlock::Text { text }),
                    GeminiPart::FunctionCall { function_call } => Some(ContentBlock::tool_use(
                        function_call.name,
                        function_call.args,
                    )),
                    GeminiPart::Other(_) => None,
                })
                .collect();
            let stop_reason = if blocks.iter().any(|b| matches!(b, ContentBlock::ToolUse { .. })) {
                StopReason::ToolUse
            } else {
                parse_stop_reason(c.finish_reason.as_deref())
            };
            (blocks, stop_reason)
        }
        None => (Vec::new(), StopReason::EndTurn),
    };

    let usage = resp.usage_metadata.unwrap_or_default();

    Response {
        id: uuid::Uuid::new_v4().to_string(),
        content,
        stop_reason,
        model,
        usage: Usage {
            input_tokens: usage.prompt_token_count,
            output_tokens: usage.candidates_token_count,
        },
    }
}

#[async_trait]
impl super::client::LlmClient for GeminiClient {
    async fn create_message(&self, req: &Request) -> Result<Response, LlmError> {
        let gemini_req = GeminiRequest::from(req);
        let url = self.endpoint(&req.model, "generateContent");
        debug!(model = %req.model, tools = req.tools.len(), "gemini generateContent");

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&gemini_req)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            let message = match serde_json::from_str::<GeminiError>(&body) {
                Ok(error) => error.error.message,
                Err(_) => body,
            };
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let gemini_resp: GeminiResponse = response.json().await?;
        Ok(convert_gemini_response(gemini_resp, req.model.clone()))
    }

    fn supports_model(&self, model: &str) -> bool {
        model.starts_with("gemini-")
    }
}
