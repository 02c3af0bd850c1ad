// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding index: fragment vectors built once at startup and searched by
//! cosine similarity.

use std::collections::HashSet;

use sova_core::traits::EmbeddingAdapter;
use sova_core::types::EmbeddingInput;
use sova_core::SovaError;
use tracing::{debug, info};

use crate::fragment::Fragment;

/// A fragment paired with its similarity to a query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredFragment {
    pub fragment: Fragment,
    pub score: f32,
}

/// Immutable mapping from each distinct fragment to its embedding vector.
///
/// Entries keep knowledge-base order so that equal scores resolve to the
/// fragment that appears first in the document.
#[derive(Debug, Clone)]
pub struct EmbeddingIndex {
    entries: Vec<(Fragment, Vec<f32>)>,
}

impl EmbeddingIndex {
    /// Embeds every distinct fragment, `batch_size` texts per request.
    ///
    /// Fails with [`SovaError::Embedding`] if there is nothing to index, if
    /// any batch fails, or if a batch returns the wrong number of vectors.
    /// There is no partial index.
    pub async fn build(
        embedder: &dyn EmbeddingAdapter,
        fragments: &[Fragment],
        batch_size: usize,
    ) -> Result<Self, SovaError> {
        let mut seen = HashSet::new();
        let unique: Vec<&Fragment> = fragments.iter().filter(|f| seen.insert(*f)).collect();

        if unique.is_empty() {
            return Err(SovaError::embedding("no fragments to index"));
        }

        let mut entries = Vec::with_capacity(unique.len());
        for batch in unique.chunks(batch_size.max(1)) {
            let output = embedder
                .embed(EmbeddingInput {
                    texts: batch.iter().map(|f| f.as_str().to_string()).collect(),
                })
                .await?;

            if output.embeddings.len() != batch.len() {
                return Err(SovaError::embedding(format!(
                    "expected {} embeddings, got {}",
                    batch.len(),
                    output.embeddings.len()
                )));
            }
            debug!(batch = batch.len(), "embedded fragment batch");

            entries.extend(
                batch
                    .iter()
                    .map(|f| (*f).clone())
                    .zip(output.embeddings),
            );
        }

        info!(count = entries.len(), "built embedding index");
        Ok(Self { entries })
    }

    /// Builds an index from precomputed vectors. Later duplicates of a
    /// fragment are ignored.
    pub fn from_entries(entries: impl IntoIterator<Item = (Fragment, Vec<f32>)>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|(fragment, _)| seen.insert(fragment.clone()))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }


    /// Returns up to `top_n` fragments by descending cosine similarity to
    /// `query`. Vectors whose dimensionality differs from the query are
    /// skipped. Ties keep index order.
    pub fn search(&self, query: &[f32], top_n: usize) -> Vec<ScoredFragment> {
        let mut scored: Vec<ScoredFragment> = self
            .entries
            .iter()
            .filter(|(_, vector)| vector.len() == query.len())
            .map(|(fragment, vector)| ScoredFragment {
                fragment: fragment.clone(),
                score: cosine_similarity(query, vector),
            })
            .collect();

        // sort_by is stable: equal scores stay in index order.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_n);
        scored
    }
}

/// Cosine similarity of two vectors.
///
/// Returns 0.0 when either vector has zero norm or the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    let denom = norm_a * norm_b;
    if denom > 0.0 { dot / denom } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sova_test_utils::MockEmbedder;

    fn frag(text: &str) -> Fragment {
        Fragment::new(text).unwrap()
    }

    fn texts(results: &[ScoredFragment]) -> Vec<&str> {
        results.iter().map(|s| s.fragment.as_str()).collect()
    }

    #[test]
    fn cosine_identical_is_one() {
        let v = vec![0.3, -1.2, 4.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_orthogonal_is_zero() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < f32::EPSILON);
    }

    #[test]
    fn cosine_opposite_is_minus_one() {
        assert!((cosine_similarity(&[1.0, 0.0], &[-2.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 1.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn cosine_length_mismatch_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 0.0]), 0.0);
    }

    proptest! {
        #[test]
        fn cosine_is_symmetric_and_bounded(
            pair in (1usize..16).prop_flat_map(|n| (
                proptest::collection::vec(-100.0f32..100.0, n),
                proptest::collection::vec(-100.0f32..100.0, n),
            ))
        ) {
            let (a, b) = pair;
            let ab = cosine_similarity(&a, &b);
            let ba = cosine_similarity(&b, &a);
            prop_assert!((ab - ba).abs() < 1e-5);
            prop_assert!((-1.0001..=1.0001).contains(&ab));
        }

        #[test]
        fn cosine_ignores_positive_scaling(
            v in proptest::collection::vec(1.0f32..10.0, 1..8),
            k in 0.5f32..20.0,
        ) {
            let scaled: Vec<f32> = v.iter().map(|x| x * k).collect();
            prop_assert!((cosine_similarity(&v, &scaled) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn search_returns_top_n_descending() {
        let query = vec![1.0, 0.0];
        // Unit vectors with cosine 0.9, 0.5 and 0.8 against the query.
        let index = EmbeddingIndex::from_entries(vec![
            (frag("f1"), vec![0.9, (1.0f32 - 0.81).sqrt()]),
            (frag("f2"), vec![0.5, (1.0f32 - 0.25).sqrt()]),
            (frag("f3"), vec![0.8, 0.6]),
        ]);

        let results = index.search(&query, 2);
        assert_eq!(texts(&results), vec!["f1", "f3"]);
        assert!((results[0].score - 0.9).abs() < 1e-5);
        assert!((results[1].score - 0.8).abs() < 1e-5);
    }

    #[test]
    fn search_with_fewer_fragments_than_top_n() {
        let index = EmbeddingIndex::from_entries(vec![(frag("only"), vec![1.0])]);
        assert_eq!(index.search(&[1.0], 3).len(), 1);
    }

    #[test]
    fn search_ties_keep_index_order() {
        let index = EmbeddingIndex::from_entries(vec![
            (frag("b"), vec![1.0, 1.0]),
            (frag("a"), vec![2.0, 2.0]),
            (frag("c"), vec![3.0, 3.0]),
        ]);
        let results = index.search(&[1.0, 1.0], 3);
        assert_eq!(texts(&results), vec!["b", "a", "c"]);
    }

    #[test]
    fn search_skips_mismatched_dimensions() {
        let index = EmbeddingIndex::from_entries(vec![
            (frag("short"), vec![1.0]),
            (frag("ok"), vec![0.0, 1.0]),
        ]);
        let results = index.search(&[1.0, 0.0], 3);
        assert_eq!(texts(&results), vec!["ok"]);
    }

    #[test]
    fn from_entries_keeps_first_duplicate() {
        let index = EmbeddingIndex::from_entries(vec![
            (frag("x"), vec![1.0, 0.0]),
            (frag("x"), vec![0.0, 1.0]),
        ]);
        assert_eq!(index.len(), 1);
        let results = index.search(&[1.0, 0.0], 3);
        assert_eq!(texts(&results), vec!["x"]);
        assert!((results[0].score - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn build_dedupes_and_batches() {
        let embedder = MockEmbedder::with_dimensions(16);
        let fragments = vec![frag("a"), frag("b"), frag("a"), frag("c"), frag("d")];

        let index = EmbeddingIndex::build(&embedder, &fragments, 2).await.unwrap();
        assert_eq!(index.len(), 4);

        let calls = embedder.calls().await;
        assert_eq!(
            calls,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
            ]
        );
    }

    #[tokio::test]
    async fn build_empty_is_error() {
        let embedder = MockEmbedder::new();
        let err = EmbeddingIndex::build(&embedder, &[], 4).await.unwrap_err();
        assert!(matches!(err, SovaError::Embedding { .. }));
    }

    #[tokio::test]
    async fn build_fails_whole_index_on_batch_error() {
        let embedder = MockEmbedder::new().fail_on("c");
        let fragments = vec![frag("a"), frag("b"), frag("c")];

        let err = EmbeddingIndex::build(&embedder, &fragments, 2).await.unwrap_err();
        assert!(matches!(err, SovaError::Embedding { .. }));
    }
}
