//! Test doubles shared by the unit tests

use async_trait::async_trait;
use newsletter_llm::{CompletionRequest, CompletionResponse, LLMError, LLMProvider};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// What a [`ScriptedProvider`] answers with
#[derive(Debug, Clone)]
pub enum Reply {
    /// Generated text
    Text(String),
    /// Transport or HTTP failure
    Fail,
    /// Body of an unknown layout
    UnknownShape,
}

/// LLM provider returning a fixed reply and recording the requests it saw
pub struct ScriptedProvider {
    reply: Reply,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new(Reply::Text(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> newsletter_llm::Result<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        match &self.reply {
            Reply::Text(text) => Ok(CompletionResponse {
                text: text.clone(),
                stop_reason: None,
                usage: None,
            }),
            Reply::Fail => Err(LLMError::RequestFailed("HTTP 503: unavailable".to_string())),
            Reply::UnknownShape => Err(LLMError::UnrecognizedShape("{\"result\":\"?\"}".to_string())),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
