// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query-time retrieval over the embedding index.

use std::sync::Arc;

use sova_config::model::KnowledgeConfig;
use sova_core::traits::EmbeddingAdapter;
use sova_core::SovaError;
use tracing::{debug, warn};

use crate::fragment::Fragment;
use crate::index::{EmbeddingIndex, ScoredFragment};

/// Embeds user queries and looks up the most similar fragments.
#[derive(Clone)]
pub struct KnowledgeRetriever {
    index: Arc<EmbeddingIndex>,
    embedder: Arc<dyn EmbeddingAdapter>,
    top_n: usize,
}

impl KnowledgeRetriever {
    pub fn new(
        index: Arc<EmbeddingIndex>,
        embedder: Arc<dyn EmbeddingAdapter>,
        config: &KnowledgeConfig,
    ) -> Self {
        Self {
            index,
            embedder,
            top_n: config.top_n,
        }
    }

    /// Embeds `query` and returns scored matches, propagating embedding errors.
    pub async fn retrieve_scored(&self, query: &str) -> Result<Vec<ScoredFragment>, SovaError> {
        let query_vector = self.embedder.embed_query(query).await?;
        let results = self.index.search(&query_vector, self.top_n);
        debug!(
            matches = results.len(),
            best = results.first().map(|s| s.score),
            "retrieved fragments"
        );
        Ok(results)
    }

    /// Returns the top fragments for `query`, best first.
    ///
    /// Never fails: a retrieval error is logged and yields an empty list so
    /// the caller can answer without context.
    pub async fn retrieve(&self, query: &str) -> Vec<Fragment> {
        match self.retrieve_scored(query).await {
            Ok(results) => results.into_iter().map(|s| s.fragment).collect(),
            Err(e) => {
                warn!(error = %e.chain(), "fragment retrieval failed, continuing without context");
                Vec::new()
            }
        }
    }
}
