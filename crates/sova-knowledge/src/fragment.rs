// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fragment store: loading and splitting the knowledge-base document.

use std::fmt;
use std::path::Path;

use sova_core::SovaError;
use tracing::info;

/// Fragment separator: a literal backslash-backslash sequence.
pub const DELIMITER: &str = "\\\\";

/// A piece of knowledge-base text, non-empty after trimming.
///
/// Identity is the exact text, so fragments double as index keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment(String);

impl Fragment {
    /// Trims `text` and wraps it, or returns `None` if nothing is left.
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Splits document text on [`DELIMITER`], trimming each piece and dropping
/// empty ones. Order of appearance is preserved.
pub fn split_fragments(content: &str) -> Vec<Fragment> {
    content.split(DELIMITER).filter_map(Fragment::new).collect()
}

/// Reads the knowledge-base document at `path` and splits it into fragments.
///
/// An unreadable file and a document with no fragments are both
/// [`SovaError::Load`]; the assistant must not start without a knowledge base.
pub async fn load(path: &Path) -> Result<Vec<Fragment>, SovaError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SovaError::Load {
            path: path.to_path_buf(),
            message: "failed to read file".to_string(),
            source: Some(Box::new(e)),
        })?;

    let fragments = split_fragments(&content);
    if fragments.is_empty() {
        return Err(SovaError::Load {
            path: path.to_path_buf(),
            message: "no fragments found".to_string(),
            source: None,
        });
    }

    info!(
        path = %path.display(),
        count = fragments.len(),
        "loaded knowledge base fragments"
    );
    Ok(fragments)
}
