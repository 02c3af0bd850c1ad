// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Sova knowledge-base assistant.
//!
//! This crate provides the error type, message types, and the adapter
//! traits through which the assistant talks to its two external
//! collaborators: a chat model and an embedding model.

pub mod error;
pub mod traits;
pub mod types;

pub use error::SovaError;
pub use types::{ChatMessage, EmbeddingInput, EmbeddingOutput, Role};

pub use traits::{ChatModelAdapter, EmbeddingAdapter, PluginAdapter};
