// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query processing for the Sova assistant.
//!
//! Ties conversation memory, knowledge retrieval and the chat model
//! together behind two operations: [`QueryProcessor::answer`] and
//! [`QueryProcessor::reset_history`].

pub mod bootstrap;
pub mod processor;
pub mod prompt;

pub use bootstrap::bootstrap;
pub use processor::{build_context_message, QueryProcessor, APOLOGY_MESSAGE};
pub use prompt::{load_system_prompt, DEFAULT_SYSTEM_PROMPT};
