// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge base for the Sova assistant.
//!
//! ## Architecture
//!
//! - **Fragment store**: reads the knowledge-base document and splits it
//!   into trimmed, non-empty [`Fragment`]s
//! - **EmbeddingIndex**: immutable map from fragment to vector, built once
//!   at startup, searched by cosine similarity
//! - **KnowledgeRetriever**: embeds a query and returns the top-N fragments,
//!   degrading to an empty result when retrieval fails

pub mod fragment;
pub mod index;
pub mod retriever;

pub use fragment::{load, split_fragments, Fragment, DELIMITER};
pub use index::{cosine_similarity, EmbeddingIndex, ScoredFragment};
pub use retriever::KnowledgeRetriever;
