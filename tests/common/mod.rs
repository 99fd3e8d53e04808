//! Shared test fixtures.

#![allow(dead_code)]

use async_trait::async_trait;
use millionaire::{CompletionRequest, LlmError, LlmTransport, QuestionProvider};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Transport that replays canned responses and records every call.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_ok(&self, content: impl Into<String>) {
        self.responses
            .lock()
            .expect("lock")
            .push_back(Ok(content.into()));
    }

    pub fn push_err(&self, message: &str) {
        self.responses
            .lock()
            .expect("lock")
            .push_back(Err(LlmError::new(message.to_string())));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("lock").clone()
    }
}

#[async_trait]
impl LlmTransport for MockTransport {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(*request.json_mode(), "question requests must ask for JSON");
        self.prompts
            .lock()
            .expect("lock")
            .push(request.prompt().clone());
        self.responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::new("no canned response".to_string())))
    }
}

/// JSON content the model would return.
pub fn question_json(prompt: &str, options: [&str; 4], answer_idx: i64) -> String {
    serde_json::json!({
        "question": prompt,
        "options": options,
        "answer_idx": answer_idx,
    })
    .to_string()
}

pub fn paris_json() -> String {
    question_json("Thủ đô của Pháp là gì?", ["Paris", "Lyon", "Nice", "Caen"], 0)
}

/// Provider wired to `transport` with a dummy credential.
pub fn configured_provider(transport: Arc<MockTransport>) -> QuestionProvider {
    QuestionProvider::new(
        transport,
        Some("test-key".to_string()),
        "GROQ_API_KEY".to_string(),
        "llama-3.3-70b-versatile".to_string(),
    )
}

/// Provider wired to `transport` with no credential.
pub fn unconfigured_provider(transport: Arc<MockTransport>) -> QuestionProvider {
    QuestionProvider::new(
        transport,
        None,
        "GROQ_API_KEY".to_string(),
        "llama-3.3-70b-versatile".to_string(),
    )
}
