// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock embedding model producing deterministic vectors.
//!
//! Texts are embedded as hashed bag-of-words counts, so texts sharing
//! words have positive cosine similarity without any real model.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use sova_core::traits::{EmbeddingAdapter, PluginAdapter};
use sova_core::types::{EmbeddingInput, EmbeddingOutput};
use sova_core::SovaError;

/// Default dimensionality of mock vectors.
pub const DEFAULT_DIMENSIONS: usize = 256;

/// A mock embedding model.
///
/// Vector for a text, in priority order: an explicit override registered
/// with [`MockEmbedder::with_vector`], otherwise [`bag_of_words`].
pub struct MockEmbedder {
    dimensions: usize,
    overrides: HashMap<String, Vec<f32>>,
    fail_on: HashSet<String>,
    failing: AtomicBool,
    delay: Option<Duration>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl MockEmbedder {
    /// Create a mock producing [`DEFAULT_DIMENSIONS`]-dim vectors.
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_DIMENSIONS)
    }

    /// Create a mock producing `dimensions`-dim vectors.
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
            overrides: HashMap::new(),
            fail_on: HashSet::new(),
            failing: AtomicBool::new(false),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Return `vector` whenever exactly `text` is embedded.
    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.overrides.insert(text.into(), vector);
        self
    }

    /// Sleep for `delay` before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail any request that contains exactly `text`.
    pub fn fail_on(mut self, text: impl Into<String>) -> Self {
        self.fail_on.insert(text.into());
        self
    }

    /// Toggle failure of every request.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Texts of every request received so far, oldest first.
    pub async fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().await.clone()
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        self.overrides
            .get(text)
            .cloned()
            .unwrap_or_else(|| bag_of_words(text, self.dimensions))
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

/// Hashed bag-of-words vector: each lowercased alphanumeric token adds 1.0
/// to the slot chosen by its FNV-1a hash.
pub fn bag_of_words(text: &str, dimensions: usize) -> Vec<f32> {
    let dimensions = dimensions.max(1);
    let mut vector = vec![0.0f32; dimensions];
    for token in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        let slot = fnv1a(&token.to_lowercase()) % dimensions as u64;
        vector[slot as usize] += 1.0;
    }
    vector
}

fn fnv1a(token: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    token
        .bytes()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}

impl PluginAdapter for MockEmbedder {
    fn name(&self) -> &str {
        "mock-embedder"
    }
}

#[async_trait]
impl EmbeddingAdapter for MockEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, SovaError> {
        self.calls.lock().await.push(input.texts.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(SovaError::embedding("mock embedder failure"));
        }
        if let Some(text) = input.texts.iter().find(|t| self.fail_on.contains(*t)) {
            return Err(SovaError::embedding(format!("mock embedder refused `{text}`")));
        }

        Ok(EmbeddingOutput {
            embeddings: input.texts.iter().map(|t| self.vector_for(t)).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bag_of_words_is_case_and_punctuation_insensitive() {
        assert_eq!(
            bag_of_words("Вторая пара?", 64),
            bag_of_words("вторая, ПАРА", 64)
        );
    }

    #[test]
    fn bag_of_words_counts_tokens() {
        let v = bag_of_words("a a b", 1);
        assert_eq!(v, vec![3.0]);
    }

    #[test]
    fn bag_of_words_empty_text_is_zero_vector() {
        assert!(bag_of_words("  ...  ", 8).iter().all(|x| *x == 0.0));
    }

    #[tokio::test]
    async fn override_wins_over_bag_of_words() {
        let embedder = MockEmbedder::with_dimensions(2).with_vector("x", vec![0.5, 0.5]);
        let out = embedder.embed_query("x").await.unwrap();
        assert_eq!(out, vec![0.5, 0.5]);
    }

    #[tokio::test]
    async fn fail_on_rejects_only_that_text() {
        let embedder = MockEmbedder::new().fail_on("bad");
        assert!(embedder.embed_query("good").await.is_ok());
        let err = embedder.embed_query("bad").await.unwrap_err();
        assert!(matches!(err, SovaError::Embedding { .. }));
        assert_eq!(embedder.calls().await.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_applied_before_answering() {
        let embedder = MockEmbedder::new().with_delay(Duration::from_secs(30));
        let started = tokio::time::Instant::now();
        embedder.embed_query("slow").await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(30));
        assert_eq!(embedder.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn set_failing_rejects_everything() {
        let embedder = MockEmbedder::new();
        embedder.set_failing(true);
        assert!(embedder.embed_query("anything").await.is_err());
    }
}
