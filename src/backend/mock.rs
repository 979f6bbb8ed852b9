//! Mock backend for testing without a live LLM.
//!
//! [`MockBackend`] returns pre-scripted responses in order, allowing
//! deterministic tests of the pipeline and the HTTP layer. Scripted
//! entries may also be failures, which lets tests exercise the
//! orchestrator's short-circuit behavior.
//!
//! # Example
//!
//! ```
//! use sceneforge::backend::MockBackend;
//!
//! let mock = MockBackend::new(vec!["Scene 1: A quiet harbor.".to_string()]);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::Client;

use super::{Backend, LlmRequest, LlmResponse};
use crate::error::Result;
use crate::PipelineError;

/// One scripted mock outcome: a canned response or a simulated failure.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text as the generated response.
    Text(String),
    /// Fail the call with this message (simulates a generation failure).
    Failure(String),
}

/// A test backend that returns scripted replies in order.
///
/// Cycles back to the beginning when all replies have been consumed.
#[derive(Debug)]
pub struct MockBackend {
    replies: Vec<MockReply>,
    index: AtomicUsize,
}

impl MockBackend {
    /// Create a mock backend with the given canned text responses.
    ///
    /// Responses are returned in order. When exhausted, cycles from the beginning.
    pub fn new(responses: Vec<String>) -> Self {
        Self::script(responses.into_iter().map(MockReply::Text).collect())
    }

    /// Create a mock backend from a full script of replies (text or failure).
    pub fn script(replies: Vec<MockReply>) -> Self {
        assert!(!replies.is_empty(), "MockBackend requires at least one reply");
        Self {
            replies,
            index: AtomicUsize::new(0),
        }
    }

    /// Create a mock that always returns the same response.
    pub fn fixed(response: impl Into<String>) -> Self {
        Self::new(vec![response.into()])
    }

    /// Create a mock that always fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::script(vec![MockReply::Failure(message.into())])
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    fn next_reply(&self) -> MockReply {
        let idx = self.index.fetch_add(1, Ordering::Relaxed) % self.replies.len();
        self.replies[idx].clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn complete(
        &self,
        _client: &Client,
        _base_url: &str,
        _request: &LlmRequest,
    ) -> Result<LlmResponse> {
        match self.next_reply() {
            MockReply::Text(text) => Ok(LlmResponse {
                text,
                status: 200,
                metadata: None,
            }),
            MockReply::Failure(message) => Err(PipelineError::Other(message)),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
