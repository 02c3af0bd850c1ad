// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Sova tests.
//!
//! Provides mock collaborators for fast, deterministic tests that never
//! reach a real model endpoint.
//!
//! - [`MockChatModel`] - chat model with queued replies and request capture
//! - [`MockEmbedder`] - embedding model with deterministic bag-of-words vectors

pub mod mock_chat;
pub mod mock_embedder;

pub use mock_chat::MockChatModel;
pub use mock_embedder::{bag_of_words, MockEmbedder};
