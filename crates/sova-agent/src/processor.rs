// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The query processor: one user turn from question to reply.

use std::sync::Arc;
use std::time::Duration;

use sova_core::traits::ChatModelAdapter;
use sova_core::types::ChatMessage;
use sova_core::SovaError;
use sova_knowledge::{Fragment, KnowledgeRetriever};
use sova_memory::ConversationMemory;
use tracing::{debug, error, info, warn};

/// Reply returned whenever a turn fails.
pub const APOLOGY_MESSAGE: &str =
    "Извините, произошла ошибка при обработке вашего запроса. Пожалуйста, попробуйте еще раз.";

const CONTEXT_PREAMBLE: &str =
    "Вот контекст, который может помочь ответить на последний вопрос пользователя:";
const CONTEXT_INSTRUCTION: &str =
    "Пожалуйста, используй этот контекст для ответа на последний вопрос.";

/// Wraps retrieved fragments into the per-turn context message.
///
/// Fragments are joined with a blank line, best match first.
pub fn build_context_message(fragments: &[Fragment]) -> ChatMessage {
    let context = fragments
        .iter()
        .map(Fragment::as_str)
        .collect::<Vec<_>>()
        .join("\n\n");
    ChatMessage::Human(format!(
        "{CONTEXT_PREAMBLE}\n\n{context}\n\n{CONTEXT_INSTRUCTION}"
    ))
}

/// Answers user questions with retrieval-augmented generation.
///
/// Shared across tasks behind an `Arc`; all mutable state lives in
/// [`ConversationMemory`].
pub struct QueryProcessor {
    memory: Arc<ConversationMemory>,
    retriever: KnowledgeRetriever,
    model: Arc<dyn ChatModelAdapter>,
    request_timeout: Duration,
}

impl QueryProcessor {
    pub fn new(
        memory: Arc<ConversationMemory>,
        retriever: KnowledgeRetriever,
        model: Arc<dyn ChatModelAdapter>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            memory,
            retriever,
            model,
            request_timeout,
        }
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Answers `query` for `user_id`. Never fails.
    ///
    /// On any error the failure is logged and [`APOLOGY_MESSAGE`] is
    /// returned. History changes made before the failure are kept.
    pub async fn answer(&self, user_id: &str, query: &str) -> String {
        match self.try_answer(user_id, query).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(
                    user_id,
                    error = %e.chain(),
                    detail = ?e,
                    "failed to process query"
                );
                APOLOGY_MESSAGE.to_string()
            }
        }
    }

    /// Re-seeds the user's history. Returns `false` if there was none.
    pub fn reset_history(&self, user_id: &str) -> bool {
        let reset = self.memory.reset(user_id);
        info!(user_id, reset, "history reset");
        reset
    }

    /// The fallible body of [`answer`](Self::answer).
    pub async fn try_answer(&self, user_id: &str, query: &str) -> Result<String, SovaError> {
        let mut messages = self
            .memory
            .append(user_id, ChatMessage::Human(query.to_string()));

        let fragments = self.retrieve(query).await;
        if fragments.is_empty() {
            debug!(user_id, "no context fragments, answering from history only");
        } else {
            debug!(user_id, fragments = fragments.len(), "adding context message");
            // Sent for this turn only, never stored.
            messages.push(build_context_message(&fragments));
        }

        let text = self.invoke(&messages).await?.into_content();
        self.memory.append(user_id, ChatMessage::Ai(text.clone()));
        Ok(text)
    }

    async fn retrieve(&self, query: &str) -> Vec<Fragment> {
        match tokio::time::timeout(self.request_timeout, self.retriever.retrieve(query)).await {
            Ok(fragments) => fragments,
            Err(_) => {
                warn!(
                    timeout = ?self.request_timeout,
                    "fragment retrieval timed out, continuing without context"
                );
                Vec::new()
            }
        }
    }

    async fn invoke(&self, messages: &[ChatMessage]) -> Result<ChatMessage, SovaError> {
        tokio::time::timeout(self.request_timeout, self.model.invoke(messages))
            .await
            .map_err(|_| SovaError::Timeout {
                duration: self.request_timeout,
            })?
    }
}
