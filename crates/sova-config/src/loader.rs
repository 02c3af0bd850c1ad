// SPDX-FileCopyrightText: 2026 Sova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sova.toml` > `~/.config/sova/sova.toml` > `/etc/sova/sova.toml`
//! with environment variable overrides via `SOVA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SovaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sova/sova.toml`
/// 3. `~/.config/sova/sova.toml`
/// 4. `./sova.toml`
/// 5. `SOVA_*` environment variables
pub fn load_config() -> Result<SovaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<SovaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SovaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
///
/// Unlike the XDG hierarchy, the file must exist.
pub fn load_config_from_path(path: &Path) -> Result<SovaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SovaConfig::default()))
        .merge(Toml::file_exact(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for XDG config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SovaConfig::default()))
        .merge(Toml::file("/etc/sova/sova.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("sova/sova.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("sova.toml"))
        .merge(env_provider())
}

/// Environment provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `SOVA_PROVIDER_API_KEY` must become `provider.api_key`.
fn env_provider() -> Env {
    Env::prefixed("SOVA_").map(|key| map_env_key(&key.as_str().to_ascii_lowercase()).into())
}

/// Maps a lowercased, prefix-stripped env var name to a dotted config key.
pub(crate) fn map_env_key(key: &str) -> String {
    const SECTIONS: [&str; 4] = ["agent", "knowledge", "memory", "provider"];

    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
