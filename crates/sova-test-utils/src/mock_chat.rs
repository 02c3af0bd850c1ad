// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat model for deterministic testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use sova_core::traits::{ChatModelAdapter, PluginAdapter};
use sova_core::types::ChatMessage;
use sova_core::SovaError;

/// A mock chat model that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue; when the queue is empty the
/// reply is `"mock response"`. Every message list passed to `invoke` is
/// recorded, including calls that fail.
pub struct MockChatModel {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
    failing: AtomicBool,
    delay: Option<Duration>,
}

impl MockChatModel {
    /// Create a mock with an empty reply queue.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            delay: None,
        }
    }

    /// Create a mock pre-loaded with the given replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            ..Self::new()
        }
    }

    /// Create a mock whose every call fails with a model error.
    pub fn failing() -> Self {
        let model = Self::new();
        model.set_failing(true);
        model
    }

    /// Sleep for `delay` before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Toggle failure mode.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Add a reply to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.responses.lock().await.push_back(text.into());
    }

    /// All message lists received so far, oldest first.
    pub async fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().await.clone()
    }

    /// The most recent message list received, if any.
    pub async fn last_request(&self) -> Option<Vec<ChatMessage>> {
        self.requests.lock().await.last().cloned()
    }

    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string())
    }
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginAdapter for MockChatModel {
    fn name(&self) -> &str {
        "mock-chat"
    }
}

#[async_trait]
impl ChatModelAdapter for MockChatModel {
    async fn invoke(&self, messages: &[ChatMessage]) -> Result<ChatMessage, SovaError> {
        self.requests.lock().await.push(messages.to_vec());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(SovaError::model("mock model failure"));
        }

        Ok(ChatMessage::Ai(self.next_response().await))
    }
}
