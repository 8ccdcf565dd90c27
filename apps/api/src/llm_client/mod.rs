/// LLM Client: the single point of entry for all model calls in the engine.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// Engine code talks to `BoundedInvoker`, never to a provider, so every call
/// carries a hard deadline.
///
/// Model: claude-sonnet-4-5 (hardcoded; do not make configurable to prevent drift)
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;
#[cfg(test)]
pub mod testing;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
/// Match and readiness replies are small JSON objects.
const MAX_TOKENS: u32 = 1024;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Normalized failure of a bounded model call. This is the only error shape
/// that crosses the invoker boundary.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("model call exceeded its {0:?} deadline")]
    Timeout(Duration),

    #[error("model provider unavailable: {0}")]
    Unavailable(String),

    #[error("model returned a malformed envelope: {0}")]
    Malformed(String),
}

/// The model replied, but not with the JSON shape the prompt asked for.
#[derive(Debug, Error)]
#[error("unusable model response: {0}")]
pub struct ResponseParseError(pub String);

/// A fully rendered instruction, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPrompt {
    pub system: String,
    pub user: String,
}

/// Anything that can turn a rendered prompt into raw model text.
/// Implementations perform exactly one attempt; deadlines are applied by
/// `BoundedInvoker`.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Anthropic Messages API provider.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .build()?,
            api_key,
        })
    }

    /// Makes a single raw call to the Claude API, returning the full response object.
    /// Never retries: retry policy belongs to callers so latency stays bounded.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl ModelProvider for LlmClient {
    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, LlmError> {
        let response = self.call(&prompt.user, &prompt.system).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Wraps a provider with a hard, cancelling deadline.
///
/// When the deadline elapses the provider future is dropped, which aborts the
/// in-flight request. Every failure is normalized to `InvokeError`.
#[derive(Clone)]
pub struct BoundedInvoker {
    provider: Arc<dyn ModelProvider>,
    deadline: Duration,
}

impl BoundedInvoker {
    pub fn new(provider: Arc<dyn ModelProvider>, deadline: Duration) -> Self {
        Self { provider, deadline }
    }

    /// Performs exactly one model call under the configured deadline.
    pub async fn invoke(&self, prompt: &RenderedPrompt) -> Result<String, InvokeError> {
        let started = tokio::time::Instant::now();
        match tokio::time::timeout(self.deadline, self.provider.complete(prompt)).await {
            Ok(Ok(text)) => {
                debug!("Model call completed in {}ms", started.elapsed().as_millis());
                Ok(text)
            }
            Ok(Err(err)) => {
                let err = classify(err, self.deadline);
                warn!("Model call failed: {err}");
                Err(err)
            }
            Err(_) => {
                warn!("Model call abandoned after {:?} deadline", self.deadline);
                Err(InvokeError::Timeout(self.deadline))
            }
        }
    }
}

fn classify(err: LlmError, deadline: Duration) -> InvokeError {
    match err {
        LlmError::Http(e) if e.is_timeout() => InvokeError::Timeout(deadline),
        LlmError::Http(e) if e.is_decode() => InvokeError::Malformed(e.to_string()),
        LlmError::Http(e) => InvokeError::Unavailable(e.to_string()),
        LlmError::Api { status, message } => {
            InvokeError::Unavailable(format!("status {status}: {message}"))
        }
        LlmError::Parse(e) => InvokeError::Malformed(e.to_string()),
        LlmError::EmptyContent => InvokeError::Malformed("no text content block".to_string()),
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Returns the outermost `{ ... }` span of model output, tolerating code
/// fences or stray prose around it.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let text = strip_json_fences(text);
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parses raw model text into a JSON object without assuming any field exists.
pub fn parse_json_object(raw: &str) -> Result<serde_json::Value, ResponseParseError> {
    let json = extract_json_object(raw)
        .ok_or_else(|| ResponseParseError("no JSON object in model output".to_string()))?;
    serde_json::from_str(json).map_err(|e| ResponseParseError(e.to_string()))
}
