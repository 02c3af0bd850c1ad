// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Sova assistant.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, `SOVA_*` environment variable overrides, and
//! diagnostic error rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use sova_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Knowledge base: {}", config.knowledge.path);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::SovaConfig;

/// Load configuration from the standard file hierarchy plus `SOVA_*`
/// environment variables, then validate it.
///
/// Deserialization errors become diagnostics with source spans and typo
/// suggestions. Validation reports every violated rule at once.
pub fn load_and_validate() -> Result<SovaConfig, Vec<ConfigError>> {
    checked(loader::load_config(), collect_toml_sources)
}

/// Like [`load_and_validate`], but reads only `path` (plus env overrides).
///
/// A missing `path` is an error rather than an empty layer.
pub fn load_and_validate_path(path: &Path) -> Result<SovaConfig, Vec<ConfigError>> {
    if !path.is_file() {
        return Err(vec![ConfigError::NotFound {
            path: path.display().to_string(),
        }]);
    }
    checked(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

/// Like [`load_and_validate`], but reads only a TOML string. No files or
/// environment variables are consulted.
pub fn load_and_validate_str(toml_content: &str) -> Result<SovaConfig, Vec<ConfigError>> {
    checked(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Validates a loaded config, or converts the load failure into diagnostics
/// against the sources returned by `sources`.
fn checked(
    loaded: Result<SovaConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<SovaConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => validation::validate_config(&config).map(|()| config),
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Ok(content) = std::fs::read_to_string("sova.toml") {
        let path = std::env::current_dir()
            .map(|d| d.join("sova.toml").display().to_string())
            .unwrap_or_else(|_| "sova.toml".to_string());
        sources.push((path, content));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("sova/sova.toml");
        if let Ok(content) = std::fs::read_to_string(&path) {
            sources.push((path.display().to_string(), content));
        }
    }

    let system_path = Path::new("/etc/sova/sova.toml");
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push((system_path.display().to_string(), content));
    }

    sources
}
