// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Sova crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Speaker of a [`ChatMessage`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Human,
    Ai,
}

/// A single conversation message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "lowercase")]
pub enum ChatMessage {
    /// The fixed instruction that seeds every history.
    System(String),
    /// A message written by the user (or synthesized on their behalf).
    Human(String),
    /// A reply produced by the chat model.
    Ai(String),
}

impl ChatMessage {
    /// Returns the speaker of this message.
    pub fn role(&self) -> Role {
        match self {
            ChatMessage::System(_) => Role::System,
            ChatMessage::Human(_) => Role::Human,
            ChatMessage::Ai(_) => Role::Ai,
        }
    }

    /// Returns the text carried by this message.
    pub fn content(&self) -> &str {
        match self {
            ChatMessage::System(text) | ChatMessage::Human(text) | ChatMessage::Ai(text) => text,
        }
    }

    /// Consumes the message and returns its text.
    pub fn into_content(self) -> String {
        match self {
            ChatMessage::System(text) | ChatMessage::Human(text) | ChatMessage::Ai(text) => text,
        }
    }
}

/// Input for an embedding adapter.
#[derive(Debug, Clone)]
pub struct EmbeddingInput {
    /// Texts to embed, in order.
    pub texts: Vec<String>,
}

/// Output from an embedding adapter.
#[derive(Debug, Clone)]
pub struct EmbeddingOutput {
    /// One vector per input text, in input order.
    pub embeddings: Vec<Vec<f32>>,
}
