// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage backend for per-user histories.

use dashmap::DashMap;
use sova_core::types::ChatMessage;

/// Keyed storage of message histories.
///
/// Every mutation of one user's entry runs atomically with respect to other
/// mutations of the same entry. Different users never block each other for
/// longer than a single update.
pub trait HistoryStore: Send + Sync {
    /// A copy of the user's history, if one exists.
    fn get(&self, user_id: &str) -> Option<Vec<ChatMessage>>;

    /// Runs `apply` on the user's history, creating it from `seed` first if
    /// absent, and returns the resulting history.
    fn upsert(
        &self,
        user_id: &str,
        seed: &dyn Fn() -> Vec<ChatMessage>,
        apply: &mut dyn FnMut(&mut Vec<ChatMessage>),
    ) -> Vec<ChatMessage>;

    /// Runs `apply` only if the user has a history. Returns whether it did.
    fn update_existing(&self, user_id: &str, apply: &mut dyn FnMut(&mut Vec<ChatMessage>))
    -> bool;
}

/// Process-local [`HistoryStore`] backed by a sharded concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    histories: DashMap<String, Vec<ChatMessage>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn get(&self, user_id: &str) -> Option<Vec<ChatMessage>> {
        self.histories.get(user_id).map(|entry| entry.value().clone())
    }

    fn upsert(
        &self,
        user_id: &str,
        seed: &dyn Fn() -> Vec<ChatMessage>,
        apply: &mut dyn FnMut(&mut Vec<ChatMessage>),
    ) -> Vec<ChatMessage> {
        // The entry guard holds the shard lock until it is dropped.
        let mut entry = self
            .histories
            .entry(user_id.to_string())
            .or_insert_with(seed);
        apply(entry.value_mut());
        entry.value().clone()
    }

    fn update_existing(
        &self,
        user_id: &str,
        apply: &mut dyn FnMut(&mut Vec<ChatMessage>),
    ) -> bool {
        match self.histories.get_mut(user_id) {
            Some(mut entry) => {
                apply(entry.value_mut());
                true
            }
            None => false,
        }
    }
}
