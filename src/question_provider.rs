//! Generates questions for a ladder level by asking a remote model.

use crate::config::ProviderSettings;
use crate::llm_client::{CompletionRequest, LlmError, LlmTransport};
use millionaire_core::{QUESTION_COUNT, Question};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Why no question could be produced.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ProviderError {
    /// No API key is configured; nothing was sent.
    #[display("{} is not set in the environment", variable)]
    NotConfigured {
        /// Environment variable that should hold the key.
        variable: String,
    },

    /// The call failed or returned something that is not a valid question.
    #[display("Question request failed: {}", _0)]
    RequestFailed(String),
}

impl std::error::Error for ProviderError {}

impl From<LlmError> for ProviderError {
    fn from(err: LlmError) -> Self {
        Self::RequestFailed(err.message)
    }
}

impl ProviderError {
    /// Message shown inline to the player.
    pub fn notice(&self) -> String {
        match self {
            Self::NotConfigured { variable } => {
                format!("Chưa cấu hình {} trong biến môi trường!", variable)
            }
            Self::RequestFailed(detail) => format!("Lỗi AI: {}", detail),
        }
    }
}

/// Shape the model is asked to return.
#[derive(Debug, Deserialize)]
struct QuestionPayload {
    question: String,
    options: Vec<String>,
    answer_idx: i64,
}

/// Turns a level into a [`Question`] via an [`LlmTransport`].
///
/// Holds no game state; the only input is the level.
#[derive(Clone)]
pub struct QuestionProvider {
    transport: Arc<dyn LlmTransport>,
    credential: Option<String>,
    credential_var: String,
    model: String,
}

impl std::fmt::Debug for QuestionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionProvider")
            .field("transport", &self.transport)
            .field("configured", &self.credential.is_some())
            .field("credential_var", &self.credential_var)
            .field("model", &self.model)
            .finish()
    }
}

impl QuestionProvider {
    /// Creates a provider, reading the credential from the environment.
    #[instrument(skip(transport, settings), fields(model = %settings.model()))]
    pub fn from_settings(transport: Arc<dyn LlmTransport>, settings: &ProviderSettings) -> Self {
        Self::new(
            transport,
            settings.credential(),
            settings.api_key_env().clone(),
            settings.model().clone(),
        )
    }

    /// Creates a provider with an explicit credential.
    #[instrument(skip(transport, credential), fields(configured = credential.is_some()))]
    pub fn new(
        transport: Arc<dyn LlmTransport>,
        credential: Option<String>,
        credential_var: String,
        model: String,
    ) -> Self {
        info!("Creating question provider");
        Self {
            transport,
            credential,
            credential_var,
            model,
        }
    }

    /// Returns true if a credential is available.
    pub fn is_configured(&self) -> bool {
        self.credential.is_some()
    }

    /// Instruction sent to the model for `level`.
    pub fn prompt(level: u8) -> String {
        format!(
            "Tạo một câu hỏi trắc nghiệm tiếng Việt cho trò chơi 'Ai là triệu phú'. \
             Cấp độ khó: {level}/{QUESTION_COUNT} (1 là dễ nhất, {QUESTION_COUNT} là khó nhất). \
             Yêu cầu trả về định dạng JSON nguyên bản, không giải thích thêm: \
             {{\"question\": \"Nội dung câu hỏi\", \"options\": [\"A\", \"B\", \"C\", \"D\"], \"answer_idx\": 0}}"
        )
    }

    /// Fetches a question for `level`.
    ///
    /// Fails with [`ProviderError::NotConfigured`] before any network call
    /// when no credential is set. No retries.
    #[instrument(skip(self), fields(model = %self.model))]
    pub async fn fetch_question(&self, level: u8) -> Result<Question, ProviderError> {
        let Some(api_key) = self.credential.clone() else {
            warn!(variable = %self.credential_var, "Question requested without credential");
            return Err(ProviderError::NotConfigured {
                variable: self.credential_var.clone(),
            });
        };

        let request = CompletionRequest::new(api_key, self.model.clone(), Self::prompt(level), true);
        debug!("Requesting question");
        let content = self.transport.complete(request).await?;

        let question = Self::parse(level, &content)?;
        info!(level, "Question generated");
        Ok(question)
    }

    /// Parses and validates a model response for `level`.
    #[instrument(skip(content), fields(content_length = content.len()))]
    pub fn parse(level: u8, content: &str) -> Result<Question, ProviderError> {
        let payload: QuestionPayload = serde_json::from_str(content.trim()).map_err(|e| {
            error!(error = %e, content = %content, "Model returned unusable JSON");
            ProviderError::RequestFailed(format!("Invalid question JSON: {}", e))
        })?;

        Question::new(level, payload.question, payload.options, payload.answer_idx).map_err(|e| {
            error!(error = %e, "Model returned an invalid question");
            ProviderError::RequestFailed(format!("Invalid question: {}", e))
        })
    }
}
