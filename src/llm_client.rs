//! Chat-completion transport for OpenAI-compatible endpoints (Groq by default).

use async_trait::async_trait;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// A single-message completion request.
#[derive(Clone, Getters, new)]
pub struct CompletionRequest {
    /// Bearer credential for the endpoint.
    api_key: String,
    /// Model identifier.
    model: String,
    /// User-role message content.
    prompt: String,
    /// Ask the endpoint for a JSON object response.
    json_mode: bool,
}

impl std::fmt::Debug for CompletionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionRequest")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("prompt_len", &self.prompt.len())
            .field("json_mode", &self.json_mode)
            .finish()
    }
}

/// Sends completion requests to a model and returns the message content.
#[async_trait]
pub trait LlmTransport: Send + Sync + std::fmt::Debug {
    /// Returns `choices[0].message.content` of the completion.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// HTTP transport speaking the `/chat/completions` wire format.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_base: String,
}

impl HttpTransport {
    /// Creates a transport for `api_base` (e.g. `https://api.groq.com/openai/v1`).
    ///
    /// Without a timeout the request waits as long as the HTTP client does.
    #[instrument(skip(api_base), fields(api_base = %api_base.as_ref()))]
    pub fn new(api_base: impl AsRef<str>, timeout: Option<Duration>) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            debug!(?timeout, "Applying request timeout");
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::new(format!("Failed to build HTTP client: {}", e)))?;

        info!("Creating LLM HTTP transport");
        Ok(Self {
            client,
            api_base: api_base.as_ref().trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of the completions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

#[async_trait]
impl LlmTransport for HttpTransport {
    #[instrument(skip(self, request), fields(model = %request.model, endpoint = %self.endpoint()))]
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        debug!("Building chat completion request");
        let body = ChatCompletionBody {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            response_format: request.json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        debug!("Sending request to completion endpoint");
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&request.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Completion request failed");
                LlmError::new(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read completion response");
            LlmError::new(format!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            error!(status = %status, response = %response_text, "Completion API error");
            return Err(LlmError::new(format!(
                "API error {}: {}",
                status, response_text
            )));
        }

        debug!(response_length = response_text.len(), "Parsing completion response");
        let parsed: ChatCompletionResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = ?e, response = %response_text, "Failed to parse completion response");
                LlmError::new(format!("Failed to parse response: {}", e))
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                error!("No content in completion response");
                LlmError::new("No content in completion response".to_string())
            })?;

        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }
}

/// LLM transport error.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LlmError {
    /// Creates a new LLM error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "LLM error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
