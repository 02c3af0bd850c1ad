// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup wiring from configuration to a ready [`QueryProcessor`].

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use sova_config::SovaConfig;
use sova_core::traits::{ChatModelAdapter, EmbeddingAdapter};
use sova_core::SovaError;
use sova_knowledge::{EmbeddingIndex, KnowledgeRetriever};
use sova_memory::ConversationMemory;
use tracing::info;

use crate::processor::QueryProcessor;
use crate::prompt::load_system_prompt;

/// Resolves the system prompt, loads and indexes the knowledge base, and
/// assembles the processor.
///
/// Any failure here is fatal: the assistant must not serve without a
/// fully built index.
pub async fn bootstrap(
    config: &SovaConfig,
    model: Arc<dyn ChatModelAdapter>,
    embedder: Arc<dyn EmbeddingAdapter>,
) -> Result<QueryProcessor, SovaError> {
    let system_prompt = load_system_prompt(&config.agent).await;

    let fragments = sova_knowledge::load(Path::new(&config.knowledge.path)).await?;
    let index = EmbeddingIndex::build(
        embedder.as_ref(),
        &fragments,
        config.knowledge.embed_batch_size,
    )
    .await?;

    let indexed = index.len();
    let embedder_name = embedder.name().to_string();
    let retriever = KnowledgeRetriever::new(Arc::new(index), embedder, &config.knowledge);
    let memory = Arc::new(ConversationMemory::new(system_prompt, &config.memory));
    let timeout = Duration::from_secs(config.provider.timeout_secs);

    info!(
        agent = config.agent.name.as_str(),
        chat_model = model.name(),
        embedder = embedder_name.as_str(),
        fragments = indexed,
        "query processor ready"
    );
    Ok(QueryProcessor::new(memory, retriever, model, timeout))
}
