// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation memory for the Sova assistant.
//!
//! Each user has an ordered message history whose first element is always
//! the system message. Histories live only in process memory and are
//! capped so that old turns fall off the front.

pub mod conversation;
pub mod store;

pub use conversation::ConversationMemory;
pub use store::{HistoryStore, InMemoryHistoryStore};
