// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Sova assistant.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type used across all Sova adapter traits and core operations.
#[derive(Debug, Error)]
pub enum SovaError {
    /// Configuration errors (invalid values, missing credentials).
    #[error("configuration error: {0}")]
    Config(String),

    /// The knowledge base could not be read or produced no fragments.
    #[error("knowledge base {path} could not be loaded: {message}")]
    Load {
        path: PathBuf,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Vectorization of knowledge-base fragments or of a query failed.
    #[error("embedding error: {message}")]
    Embedding {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The chat model invocation failed.
    #[error("model error: {message}")]
    Model {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SovaError {
    /// Shorthand for an [`SovaError::Embedding`] without an underlying source.
    pub fn embedding(message: impl Into<String>) -> Self {
        SovaError::Embedding {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a [`SovaError::Model`] without an underlying source.
    pub fn model(message: impl Into<String>) -> Self {
        SovaError::Model {
            message: message.into(),
            source: None,
        }
    }

    /// Renders the error followed by every `source()` in its chain.
    ///
    /// Used when logging so the operator sees the root cause, not just the
    /// outermost message.
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            out.push_str(": ");
            out.push_str(&cause.to_string());
            current = cause.source();
        }
        out
    }
}
