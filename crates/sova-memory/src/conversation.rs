// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capped per-user conversation histories.

use std::sync::Arc;

use sova_config::model::MemoryConfig;
use sova_core::types::ChatMessage;
use tracing::debug;

use crate::store::{HistoryStore, InMemoryHistoryStore};

/// Per-user conversation histories seeded with a shared system message.
///
/// A history is either absent (user never seen) or present. Reading or
/// appending makes it present; [`reset`](Self::reset) re-seeds a present
/// history and leaves an absent one absent.
pub struct ConversationMemory {
    system_prompt: String,
    max_history: usize,
    store: Arc<dyn HistoryStore>,
}

impl ConversationMemory {
    /// Creates memory backed by an [`InMemoryHistoryStore`].
    pub fn new(system_prompt: impl Into<String>, config: &MemoryConfig) -> Self {
        Self::with_store(system_prompt, config, Arc::new(InMemoryHistoryStore::new()))
    }

    pub fn with_store(
        system_prompt: impl Into<String>,
        config: &MemoryConfig,
        store: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            // A cap below 2 would evict every message the moment it lands.
            max_history: config.max_history.max(2),
            store,
        }
    }

    pub fn system_message(&self) -> ChatMessage {
        ChatMessage::System(self.system_prompt.clone())
    }

    /// Returns the user's history, creating it if absent.
    pub fn history(&self, user_id: &str) -> Vec<ChatMessage> {
        self.store.upsert(user_id, &|| self.seed(), &mut |_| {})
    }

    /// Appends `message` and enforces the cap, returning the stored history.
    ///
    /// When the history grows past `max_history` it becomes the system
    /// message followed by the newest `max_history - 1` messages.
    pub fn append(&self, user_id: &str, message: ChatMessage) -> Vec<ChatMessage> {
        let max = self.max_history;
        let system = self.system_message();
        let mut message = Some(message);

        self.store.upsert(user_id, &|| self.seed(), &mut |history| {
            if let Some(message) = message.take() {
                history.push(message);
            }
            if history.len() > max {
                let keep_from = history.len() - (max - 1);
                let mut capped = Vec::with_capacity(max);
                capped.push(system.clone());
                capped.extend(history.drain(keep_from..));
                *history = capped;
                debug!(user_id, len = history.len(), "history capped");
            }
        })
    }

    /// Re-seeds an existing history. Returns `false` if the user has none.
    pub fn reset(&self, user_id: &str) -> bool {
        let seed = self.seed();
        let reset = self
            .store
            .update_existing(user_id, &mut |history| *history = seed.clone());
        debug!(user_id, reset, "history reset requested");
        reset
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.store.get(user_id).is_some()
    }

    fn seed(&self) -> Vec<ChatMessage> {
        vec![self.system_message()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn memory(max_history: usize) -> ConversationMemory {
        ConversationMemory::new("sys", &MemoryConfig { max_history })
    }

    #[test]
    fn history_creates_seeded_entry() {
        let mem = memory(10);
        assert!(!mem.contains("u1"));
        assert_eq!(mem.history("u1"), vec![ChatMessage::System("sys".into())]);
        assert!(mem.contains("u1"));
    }

    #[test]
    fn append_creates_history_first() {
        let mem = memory(10);
        let history = mem.append("u1", ChatMessage::Human("hi".into()));
        assert_eq!(
            history,
            vec![
                ChatMessage::System("sys".into()),
                ChatMessage::Human("hi".into()),
            ]
        );
    }

    #[test]
    fn ten_appends_keep_system_and_last_nine() {
        let mem = memory(10);
        for i in 0..10 {
            mem.append("u1", ChatMessage::Human(format!("m{i}")));
        }

        let history = mem.history("u1");
        assert_eq!(history.len(), 10);
        assert_eq!(history[0], ChatMessage::System("sys".into()));
        assert_eq!(history[1], ChatMessage::Human("m1".into()));
        assert_eq!(history[9], ChatMessage::Human("m9".into()));
    }

    #[test]
    fn reset_absent_user_is_noop() {
        let mem = memory(10);
        assert!(!mem.reset("nobody"));
        assert!(!mem.contains("nobody"));
    }

    #[test]
    fn reset_present_user_reseeds() {
        let mem = memory(10);
        mem.append("u1", ChatMessage::Human("q".into()));
        mem.append("u1", ChatMessage::Ai("a".into()));

        assert!(mem.reset("u1"));
        assert_eq!(mem.history("u1"), vec![ChatMessage::System("sys".into())]);
        assert!(mem.reset("u1"));
    }

    #[test]
    fn users_are_independent() {
        let mem = memory(10);
        mem.append("a", ChatMessage::Human("for a".into()));
        assert_eq!(mem.history("b").len(), 1);
        assert_eq!(mem.history("a").len(), 2);
    }

    #[test]
    fn concurrent_appends_lose_nothing() {
        let mem = Arc::new(memory(1000));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let mem = Arc::clone(&mem);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        mem.append("shared", ChatMessage::Human(format!("{t}-{i}")));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(mem.history("shared").len(), 1 + 8 * 50);
    }

    proptest! {
        #[test]
        fn cap_holds_for_any_append_count(max in 2usize..20, appends in 0usize..60) {
            let mem = memory(max);
            for i in 0..appends {
                mem.append("u", ChatMessage::Human(i.to_string()));
            }
            let history = mem.history("u");

            prop_assert!(history.len() <= max);
            prop_assert_eq!(&history[0], &ChatMessage::System("sys".into()));
            prop_assert_eq!(history.len(), (appends + 1).min(max));
            if appends > 0 {
                let expected = (appends - 1).to_string();
                prop_assert_eq!(
                    history.last().map(ChatMessage::content),
                    Some(expected.as_str())
                );
            }
        }
    }
}
