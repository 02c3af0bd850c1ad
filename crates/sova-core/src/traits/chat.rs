// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat model adapter trait.

use async_trait::async_trait;

use crate::error::SovaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::ChatMessage;

/// Adapter for a conversational language model.
#[async_trait]
pub trait ChatModelAdapter: PluginAdapter {
    /// Sends the ordered message list and returns the assistant reply.
    ///
    /// Implementations return [`ChatMessage::Ai`]; failures are reported
    /// as [`SovaError::Model`].
    async fn invoke(&self, messages: &[ChatMessage]) -> Result<ChatMessage, SovaError>;
}
